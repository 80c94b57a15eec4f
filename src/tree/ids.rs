//! Per-run match id source
//!
//! Ids start at 1 and increase by one per created node.
//! Each generation run owns its generator, so concurrent runs never share
//! a counter.

use super::node::MatchId;

/// Monotonic match id generator
#[derive(Debug, Clone)]
pub struct MatchIdGenerator {
    last: MatchId,
}

impl MatchIdGenerator {
    /// Fresh generator; first id handed out is 1
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Next unused id
    pub fn next_id(&mut self) -> MatchId {
        self.last += 1;
        self.last
    }

    /// Most recently issued id (0 if none)
    pub fn last_issued(&self) -> MatchId {
        self.last
    }

    /// Start over at 1
    pub fn reset(&mut self) {
        self.last = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_resettable() {
        let mut ids = MatchIdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.last_issued(), 2);

        ids.reset();
        assert_eq!(ids.last_issued(), 0);
        assert_eq!(ids.next_id(), 1);
    }

    #[test]
    fn test_independent_generators() {
        let mut a = MatchIdGenerator::new();
        let mut b = MatchIdGenerator::new();
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), 1);
        assert_eq!(a.next_id(), 3);
    }
}
