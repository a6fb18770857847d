// portview-core: Reconciliation layer between port collaborators and the host tree view.

pub mod classify;
pub mod command;
pub mod config;
pub mod detect;
pub mod error;
pub mod idgen;
pub mod model;
pub mod redirect;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{ClassifiedPorts, classify};
pub use command::CommandRegistry;
pub use config::ViewConfig;
pub use detect::PortChangeDetector;
pub use error::CoreError;
pub use idgen::IdAllocator;
pub use redirect::{ResolvedRedirect, resolve};
pub use stream::ViewUpdates;
pub use view::{EndpointsView, FreePortFn};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Collapsible, DeclaredPort, ForwardingSession, ListeningPort, NodeCommand, REDIRECT_SERVER_PREFIX,
    RedirectRegistry, TreeItem, TreeNode,
};
