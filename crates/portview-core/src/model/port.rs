// ── Port domain types ──

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A port currently bound by some process, as observed by the port
/// change detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningPort {
    /// The bound port number.
    pub number: u16,
    /// Interface address the socket is bound to.
    pub interface: IpAddr,
}

impl ListeningPort {
    pub fn new(number: u16, interface: IpAddr) -> Self {
        Self { number, interface }
    }

    /// Whether the socket is bound to a wildcard interface
    /// (`0.0.0.0` or `::`), i.e. reachable from any network interface.
    pub fn listens_on_all_interfaces(&self) -> bool {
        self.interface.is_unspecified()
    }
}

/// A port the workspace manifest declares as an intended endpoint,
/// independent of whether anything is currently listening on it.
///
/// Port numbers are carried as strings because that is how manifests
/// declare them; [`DeclaredPort::number`] parses on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredPort {
    pub port_number: String,
    pub url: String,
    pub server_name: String,
    pub secured: bool,
}

impl DeclaredPort {
    /// Numeric port value, if the declared string parses as one.
    pub fn number(&self) -> Option<u16> {
        self.port_number.parse().ok()
    }

    /// Whether this declaration covers the given listening port.
    pub fn matches(&self, listening: &ListeningPort) -> bool {
        self.port_number == listening.number.to_string()
    }

    /// Whether the declared URL is web-reachable.
    pub fn has_http_url(&self) -> bool {
        self.url.starts_with("http")
    }
}
