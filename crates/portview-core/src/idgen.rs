// ── Node identifier allocation ──
//
// Short base-36 identifiers, unique within a single rebuild. The
// issued set is cleared at the start of every refresh so the id space
// never grows across the process lifetime.

use std::collections::HashSet;

use tracing::warn;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 4;
const ID_SPACE: u32 = 36 * 36 * 36 * 36;
const MAX_ATTEMPTS: usize = 1000;

/// Allocator for per-rebuild node identifiers.
#[derive(Debug, Default)]
pub struct IdAllocator {
    issued: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every issued id. Must run at the start of a rebuild.
    pub fn reset(&mut self) {
        self.issued.clear();
    }

    /// Produce a fresh 4-character base-36 id.
    ///
    /// Collisions are retried up to a fixed budget; past it the
    /// possible duplicate is accepted rather than failing the rebuild.
    /// Callers tolerate that case -- with a 36^4 id space and trees in
    /// the tens of nodes, the budget is effectively unreachable.
    pub fn allocate(&mut self) -> String {
        for _ in 0..MAX_ATTEMPTS {
            let id = random_id();
            if !self.issued.contains(&id) {
                self.issued.insert(id.clone());
                return id;
            }
        }

        let id = random_id();
        warn!(attempts = MAX_ATTEMPTS, "id retry budget exhausted, accepting possible duplicate");
        self.issued.insert(id.clone());
        id
    }

    /// Number of ids issued since the last reset.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

fn random_id() -> String {
    let mut value = rand::random::<u32>() % ID_SPACE;
    let mut digits = [0u8; ID_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    // The alphabet is ASCII, so the bytes are valid UTF-8.
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_four_base36_chars() {
        let mut allocator = IdAllocator::new();
        for _ in 0..100 {
            let id = allocator.allocate();
            assert_eq!(id.len(), 4);
            assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn ids_are_unique_until_reset() {
        let mut allocator = IdAllocator::new();
        let ids: HashSet<String> = (0..1000).map(|_| allocator.allocate()).collect();
        assert_eq!(ids.len(), 1000);
        assert_eq!(allocator.issued_count(), 1000);
    }

    #[test]
    fn reset_clears_the_issued_set() {
        let mut allocator = IdAllocator::new();
        allocator.allocate();
        allocator.allocate();
        assert_eq!(allocator.issued_count(), 2);

        allocator.reset();
        assert_eq!(allocator.issued_count(), 0);
    }
}
