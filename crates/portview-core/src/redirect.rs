// ── Redirect resolution ──
//
// Decides, for each listening port, whether it is the target of an
// active forwarding session, and if so which public port stands in
// for it in the rendered tree.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{ListeningPort, RedirectRegistry};

/// Redirect annotation for one listening port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRedirect {
    /// The public port the forwarding session occupies -- what the
    /// tree displays instead of the private original.
    pub listen_port: u16,
    /// Display label, `User Port Forwarding(<public>-><original>)`.
    pub label: String,
}

/// Map each listening port number to its redirect annotation, if any.
///
/// Registry keys are scanned in ascending order; if several sessions
/// target the same original port the last one scanned wins. Correct
/// session management never produces that situation, so the tie rule
/// is a non-guarantee, not a contract.
pub fn resolve(
    opened: &[ListeningPort],
    registry: &RedirectRegistry,
) -> HashMap<u16, ResolvedRedirect> {
    let mut resolved = HashMap::new();
    let redirect_ports = registry.ports();

    for port in opened {
        for &redirect_port in &redirect_ports {
            // The manager may remove a session between the key scan
            // and the lookup; a vanished entry is simply skipped.
            let Some(session) = registry.get(redirect_port) else {
                continue;
            };
            if session.target.matches(port) {
                debug!(original = port.number, public = redirect_port, "found redirect port");
                resolved.insert(
                    port.number,
                    ResolvedRedirect {
                        listen_port: redirect_port,
                        label: format!(
                            "User Port Forwarding({redirect_port}->{})",
                            session.target.port_number
                        ),
                    },
                );
            }
        }
    }

    resolved
}
