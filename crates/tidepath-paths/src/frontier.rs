//! Minimum-priority work queue of vertex keys.
//!
//! Entries are stored in a min-heap keyed by `(priority, insertion_order)`.
//! Lower priorities are popped first; ties are broken by insertion order
//! (FIFO), which keeps searches deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tidepath_core::PosKey;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    priority: i32,
    /// Monotonically increasing; lower = pushed earlier.
    seq: u64,
    key: PosKey,
}

/// The open set of a search.
///
/// Stale entries are not removed on relaxation; the search skips them when
/// they surface.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a vertex at the given priority.
    pub fn push(&mut self, key: PosKey, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { priority, seq, key }));
    }

    /// Pop the vertex with the lowest priority (ties broken FIFO).
    pub fn pop(&mut self) -> Option<(PosKey, i32)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.key, entry.priority))
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut f = Frontier::new();
        f.push(7, 3);
        f.push(8, 1);
        f.push(9, 2);

        assert_eq!(f.pop(), Some((8, 1)));
        assert_eq!(f.pop(), Some((9, 2)));
        assert_eq!(f.pop(), Some((7, 3)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn fifo_on_equal_priority() {
        let mut f = Frontier::new();
        f.push(30, 1);
        f.push(10, 1);
        f.push(20, 1);

        assert_eq!(f.pop(), Some((30, 1)));
        assert_eq!(f.pop(), Some((10, 1)));
        assert_eq!(f.pop(), Some((20, 1)));
    }

    #[test]
    fn len_and_clear() {
        let mut f = Frontier::new();
        assert!(f.is_empty());
        f.push(1, 5);
        f.push(1, 4);
        assert_eq!(f.len(), 2);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.pop(), None);
    }
}
