// ── Core error types ──
//
// The reconciliation pipeline is a pure transform over in-memory
// snapshots and cannot fail; errors only arise at the host boundary,
// when a command is dispatched against the registry.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown command: {id}")]
    UnknownCommand { id: String },

    #[error("invalid argument for {command}: {reason}")]
    InvalidArgument { command: String, reason: String },
}
