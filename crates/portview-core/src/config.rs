// ── Runtime view configuration ──
//
// Describes how the view plugs into its host: which command ids it
// invokes and registers, and how forwarding-manager declarations are
// recognized. Built by the host at startup -- core never reads config
// files.

use crate::model::REDIRECT_SERVER_PREFIX;

/// Host-facing configuration for an endpoints view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Host command invoked by the "new tab" / "preview" action nodes.
    /// Receives the declared URL as its single string argument.
    pub open_command: String,
    /// Command id registered for cancelling a forwarding session.
    /// Receives the redirect's listening port number.
    pub cancel_command: String,
    /// Server-name prefix marking declarations created by the
    /// forwarding manager; those never show up as offline endpoints.
    pub redirect_prefix: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            open_command: "portview.open-url".into(),
            cancel_command: "portview.cancel-port-forwarding".into(),
            redirect_prefix: REDIRECT_SERVER_PREFIX.into(),
        }
    }
}
