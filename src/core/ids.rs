//! Monotonic id generation
//!
//! Ids are plain `u64`s issued from an atomic counter. The contract is
//! strict: within a process lifetime an id is never handed out twice, and
//! after a snapshot load the counter is reseeded above the largest
//! persisted id so restarts never collide with history either.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic unique-id generator
///
/// Shared freely across threads; `next` is a single atomic increment.
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator starting at id 1
    pub fn new() -> Self {
        IdGenerator {
            next: AtomicU64::new(1),
        }
    }

    /// Issue the next id
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Ensure all future ids are greater than `max_existing`
    ///
    /// Called after a snapshot load. Never moves the counter backwards.
    pub fn seed_above(&self, max_existing: u64) {
        self.next.fetch_max(max_existing + 1, Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_one() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        assert_eq!(ids.next(), 3);
    }

    #[test]
    fn test_seed_above_skips_persisted_range() {
        let ids = IdGenerator::new();
        ids.seed_above(41);
        assert_eq!(ids.next(), 42);
    }

    #[test]
    fn test_seed_above_never_rewinds() {
        let ids = IdGenerator::new();
        ids.seed_above(100);
        ids.seed_above(10);
        assert_eq!(ids.next(), 101);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let ids = Arc::new(IdGenerator::new());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let ids = Arc::clone(&ids);
            handles.push(std::thread::spawn(move || {
                (0..250).map(|_| ids.next()).collect::<Vec<u64>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "id {} issued twice", id);
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
