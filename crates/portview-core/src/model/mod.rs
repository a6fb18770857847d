// ── Domain model ──
//
// Canonical types for the three reconciled inputs (listening ports,
// declared ports, forwarding sessions) and for the display forest the
// view materializes from them.

pub mod forward;
pub mod port;
pub mod tree;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use portview_core::model::*` gives you everything.

pub use forward::{ForwardingSession, REDIRECT_SERVER_PREFIX, RedirectRegistry};
pub use port::{DeclaredPort, ListeningPort};
pub use tree::{Collapsible, NodeCommand, TreeItem, TreeNode};
