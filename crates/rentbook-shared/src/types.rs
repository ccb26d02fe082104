//! Common types

use std::sync::atomic::{AtomicU64, Ordering};

pub type EntityId = u64;

/// Never handed out by [`IdSequence`], so a lookup by it always misses.
pub const UNASSIGNED_ID: EntityId = 0;

/// Monotonic identifier source. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(UNASSIGNED_ID + 1) }
    }

    pub fn next_id(&self) -> EntityId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one_and_increments() {
        let seq = IdSequence::new();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
        assert_eq!(seq.next_id(), 3);
    }

    #[test]
    fn test_unassigned_id_is_never_issued() {
        let seq = IdSequence::new();
        assert!((0..100).all(|_| seq.next_id() != UNASSIGNED_ID));
    }

    #[test]
    fn test_sequences_are_independent() {
        let users = IdSequence::new();
        let tenants = IdSequence::new();
        users.next_id();
        users.next_id();
        assert_eq!(tenants.next_id(), 1);
    }
}
