// ── Host command registry ──
//
// Command registration is a process-wide side effect in most host
// plugin APIs. Modeling it as an explicit registry keeps it testable
// and makes double registration a no-op instead of a duplicated
// handler.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;

/// A registered command handler. Receives the raw argument list the
/// host passed along with the invocation.
pub type CommandHandler = Arc<dyn Fn(&[Value]) -> Result<(), CoreError> + Send + Sync>;

/// Registry of host commands exposed by this crate.
///
/// Cheaply cloneable -- clones share the same handler table.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: Arc<DashMap<String, CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `id`. Idempotent: if the id is already
    /// taken the existing handler is kept and `false` is returned.
    pub fn register<F>(&self, id: &str, handler: F) -> bool
    where
        F: Fn(&[Value]) -> Result<(), CoreError> + Send + Sync + 'static,
    {
        match self.handlers.entry(id.to_owned()) {
            Entry::Occupied(_) => {
                debug!(command = id, "already registered, keeping existing handler");
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(handler));
                true
            }
        }
    }

    /// Invoke the handler registered under `id`.
    pub fn execute(&self, id: &str, args: &[Value]) -> Result<(), CoreError> {
        let handler = self
            .handlers
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| CoreError::UnknownCommand { id: id.to_owned() })?;
        handler(args)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }
}
