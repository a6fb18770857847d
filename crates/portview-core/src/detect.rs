// ── Port change detection interface ──
//
// Scanning the system for bound sockets belongs to the host side. The
// view only needs a synchronous snapshot of what is listening right
// now, taken once per refresh on the rebuild path.

use crate::model::ListeningPort;

/// Source of the "currently listening" snapshot.
pub trait PortChangeDetector: Send + Sync {
    /// Snapshot of all currently listening ports.
    fn opened_ports(&self) -> Vec<ListeningPort>;
}

/// Any plain closure producing a snapshot works as a detector.
impl<F> PortChangeDetector for F
where
    F: Fn() -> Vec<ListeningPort> + Send + Sync,
{
    fn opened_ports(&self) -> Vec<ListeningPort> {
        self()
    }
}
