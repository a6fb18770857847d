// ── Forwarding session types ──
//
// A forwarding session occupies a public listening port and redirects
// traffic to a declared port that is otherwise private. Sessions are
// created and torn down by an external forwarding manager; this crate
// only reads them through the shared registry, so resolution always
// sees the live session set at refresh time.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::port::DeclaredPort;

/// Server-name prefix the forwarding manager puts on the declarations
/// it creates for its own listeners. Declarations carrying it are
/// internal plumbing and are never rendered as offline endpoints.
pub const REDIRECT_SERVER_PREFIX: &str = "redirect-";

/// A single active redirect. The listening port it occupies is the key
/// in the [`RedirectRegistry`]; the value records the declared port the
/// traffic is forwarded to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingSession {
    /// The declared port this session forwards to.
    pub target: DeclaredPort,
}

impl ForwardingSession {
    pub fn new(target: DeclaredPort) -> Self {
        Self { target }
    }
}

/// Shared registry of active forwarding sessions, keyed by the
/// listening port each session occupies.
///
/// Externally owned: the forwarding manager inserts and removes
/// sessions, the view only reads. Cheaply cloneable — clones share the
/// same underlying map.
#[derive(Debug, Clone, Default)]
pub struct RedirectRegistry {
    sessions: Arc<DashMap<u16, ForwardingSession>>,
}

impl RedirectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session occupying `listen_port` (manager side).
    pub fn insert(&self, listen_port: u16, session: ForwardingSession) {
        self.sessions.insert(listen_port, session);
    }

    /// Remove the session occupying `listen_port`, if any (manager side).
    pub fn remove(&self, listen_port: u16) -> Option<ForwardingSession> {
        self.sessions.remove(&listen_port).map(|(_, session)| session)
    }

    /// Session occupying `listen_port`, if any.
    pub fn get(&self, listen_port: u16) -> Option<ForwardingSession> {
        self.sessions.get(&listen_port).map(|entry| entry.value().clone())
    }

    /// Listening ports currently occupied by a session, ascending.
    pub fn ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self.sessions.iter().map(|entry| *entry.key()).collect();
        ports.sort_unstable();
        ports
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
