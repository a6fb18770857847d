// ── Port classification ──
//
// Partitions the union of listening and declared ports into the three
// display buckets. Pure: same snapshots in, same buckets out.

use tracing::trace;

use crate::model::{DeclaredPort, ListeningPort};

/// The three display buckets produced by one classification pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedPorts {
    /// Listening and reachable from outside the workspace.
    pub public: Vec<ListeningPort>,
    /// Listening on a non-wildcard interface without a public
    /// declaration. The rebuild path never populates this bucket
    /// today (see DESIGN.md); the grouping keeps its place so the
    /// tree shape is stable.
    pub private: Vec<ListeningPort>,
    /// Declared in the workspace manifest but not currently listening.
    pub offline: Vec<DeclaredPort>,
}

/// Partition ports into public / private / offline buckets.
///
/// A listening port is public when it binds a wildcard interface (or
/// its declaration is marked secured) and the workspace declares that
/// port number at all; listening ports with no declaration are not
/// rendered. A declaration with no listener goes to the offline
/// bucket, unless its server name carries `redirect_prefix` -- those
/// belong to the forwarding manager, not the user.
pub fn classify(
    opened: &[ListeningPort],
    declared: &[DeclaredPort],
    redirect_prefix: &str,
) -> ClassifiedPorts {
    let mut public: Vec<ListeningPort> = opened
        .iter()
        .filter(|port| {
            port.listens_on_all_interfaces()
                || declared.iter().any(|decl| decl.secured && decl.matches(port))
        })
        .filter(|port| declared.iter().any(|decl| decl.matches(port)))
        .cloned()
        .collect();
    public.sort_by_key(|port| port.number);

    let mut offline: Vec<DeclaredPort> = declared
        .iter()
        .filter(|decl| !opened.iter().any(|port| decl.matches(port)))
        .filter(|decl| !decl.server_name.starts_with(redirect_prefix))
        .cloned()
        .collect();
    // Unparseable declared numbers sort last so the order stays total.
    offline.sort_by_key(|decl| decl.number().unwrap_or(u16::MAX));

    trace!(public = public.len(), offline = offline.len(), "classified ports");

    ClassifiedPorts {
        public,
        private: Vec::new(),
        offline,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::REDIRECT_SERVER_PREFIX;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    fn listening(number: u16, interface: IpAddr) -> ListeningPort {
        ListeningPort::new(number, interface)
    }

    fn declared(port: &str, server: &str, secured: bool) -> DeclaredPort {
        DeclaredPort {
            port_number: port.into(),
            url: String::new(),
            server_name: server.into(),
            secured,
        }
    }

    const ANY4: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
    const ANY6: IpAddr = IpAddr::V6(Ipv6Addr::UNSPECIFIED);
    const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn wildcard_and_declared_is_public() {
        let buckets = classify(
            &[listening(3000, ANY4), listening(3001, ANY6)],
            &[declared("3000", "web", false), declared("3001", "api", false)],
            REDIRECT_SERVER_PREFIX,
        );

        let numbers: Vec<u16> = buckets.public.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![3000, 3001]);
        assert!(buckets.offline.is_empty());
    }

    #[test]
    fn undeclared_listener_is_not_rendered() {
        let buckets = classify(&[listening(9999, ANY4)], &[], REDIRECT_SERVER_PREFIX);

        assert!(buckets.public.is_empty());
        assert!(buckets.private.is_empty());
        assert!(buckets.offline.is_empty());
    }

    #[test]
    fn secured_declaration_makes_loopback_listener_public() {
        let buckets = classify(
            &[listening(5000, LOOPBACK)],
            &[declared("5000", "dashboard", true)],
            REDIRECT_SERVER_PREFIX,
        );

        assert_eq!(buckets.public.len(), 1);
        assert_eq!(buckets.public[0].number, 5000);
    }

    #[test]
    fn unsecured_loopback_listener_is_excluded() {
        let buckets = classify(
            &[listening(5000, LOOPBACK)],
            &[declared("5000", "dashboard", false)],
            REDIRECT_SERVER_PREFIX,
        );

        assert!(buckets.public.is_empty());
        // Declared and listening, so not offline either.
        assert!(buckets.offline.is_empty());
    }

    #[test]
    fn declared_without_listener_is_offline() {
        let buckets = classify(
            &[],
            &[declared("4000", "db", false)],
            REDIRECT_SERVER_PREFIX,
        );

        assert_eq!(buckets.offline.len(), 1);
        assert_eq!(buckets.offline[0].server_name, "db");
    }

    #[test]
    fn redirect_declarations_never_show_offline() {
        let buckets = classify(
            &[],
            &[
                declared("4000", "db", false),
                declared("8081", &format!("{REDIRECT_SERVER_PREFIX}3000"), false),
            ],
            REDIRECT_SERVER_PREFIX,
        );

        assert_eq!(buckets.offline.len(), 1);
        assert_eq!(buckets.offline[0].port_number, "4000");
    }

    #[test]
    fn buckets_sort_ascending_by_port() {
        let buckets = classify(
            &[listening(8080, ANY4), listening(80, ANY4), listening(443, ANY4)],
            &[
                declared("8080", "alt", false),
                declared("80", "http", false),
                declared("443", "https", false),
                declared("9001", "z", false),
                declared("90", "a", false),
            ],
            REDIRECT_SERVER_PREFIX,
        );

        let public: Vec<u16> = buckets.public.iter().map(|p| p.number).collect();
        assert_eq!(public, vec![80, 443, 8080]);

        let offline: Vec<&str> = buckets.offline.iter().map(|d| d.port_number.as_str()).collect();
        assert_eq!(offline, vec!["90", "9001"]);
    }

    #[test]
    fn unparseable_declared_number_sorts_last() {
        let buckets = classify(
            &[],
            &[declared("abc", "weird", false), declared("4000", "db", false)],
            REDIRECT_SERVER_PREFIX,
        );

        let offline: Vec<&str> = buckets.offline.iter().map(|d| d.port_number.as_str()).collect();
        assert_eq!(offline, vec!["4000", "abc"]);
    }

    #[test]
    fn classification_is_deterministic() {
        let opened = [listening(3000, ANY4), listening(3001, LOOPBACK)];
        let declared_ports = [
            declared("3000", "web", false),
            declared("3001", "db", true),
            declared("4000", "cache", false),
        ];

        let first = classify(&opened, &declared_ports, REDIRECT_SERVER_PREFIX);
        let second = classify(&opened, &declared_ports, REDIRECT_SERVER_PREFIX);
        assert_eq!(first, second);
    }
}
