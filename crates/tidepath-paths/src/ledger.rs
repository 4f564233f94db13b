//! Per-search bookkeeping: best cost and parent per visited vertex.

use rustc_hash::FxHashMap;
use tidepath_core::{NO_PARENT, PosKey};

use crate::transport::TransportId;

/// Cost recorded for blacklisted vertices. Nothing ever relaxes below it
/// because the entry is closed from the start.
pub const BLACKLISTED: i32 = i32::MAX;

/// What the search knows about one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub cost: i32,
    /// Predecessor, or [`NO_PARENT`] for a search root.
    pub parent: PosKey,
    /// Transport used to reach this vertex. For a root, the transport whose
    /// destination seeded it.
    pub via: Option<TransportId>,
    /// Transports taken on the path to this vertex.
    pub transports_used: u16,
    pub closed: bool,
}

/// Counters reported alongside every search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vertices popped and expanded.
    pub expanded: usize,
    /// Frontier pushes.
    pub pushed: usize,
    /// The node or heap budget ran out before the search finished.
    pub exhausted: bool,
}

/// Closed set plus parent forest of one search.
#[derive(Debug, Default)]
pub struct SearchLedger {
    entries: FxHashMap<PosKey, LedgerEntry>,
}

impl SearchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: PosKey) -> Option<&LedgerEntry> {
        self.entries.get(&key)
    }

    pub fn cost(&self, key: PosKey) -> Option<i32> {
        self.entries.get(&key).map(|e| e.cost)
    }

    pub fn is_closed(&self, key: PosKey) -> bool {
        self.entries.get(&key).is_some_and(|e| e.closed)
    }

    /// Close a vertex before the search starts so it is never seeded,
    /// relaxed or expanded.
    pub fn forbid(&mut self, key: PosKey) {
        self.entries.insert(
            key,
            LedgerEntry {
                cost: BLACKLISTED,
                parent: NO_PARENT,
                via: None,
                transports_used: 0,
                closed: true,
            },
        );
    }

    /// Record a search root at cost 0. Returns `false` if the vertex is
    /// already known (blacklisted or seeded twice).
    pub fn seed(&mut self, key: PosKey, via: Option<TransportId>) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(
            key,
            LedgerEntry {
                cost: 0,
                parent: NO_PARENT,
                via,
                transports_used: 0,
                closed: false,
            },
        );
        true
    }

    /// Record `cost` via `parent` if it strictly improves an open vertex.
    /// Returns whether the entry changed.
    pub fn relax(
        &mut self,
        key: PosKey,
        cost: i32,
        parent: PosKey,
        via: Option<TransportId>,
        transports_used: u16,
    ) -> bool {
        let entry = LedgerEntry {
            cost,
            parent,
            via,
            transports_used,
            closed: false,
        };
        match self.entries.get_mut(&key) {
            Some(e) if e.closed || cost >= e.cost => false,
            Some(e) => {
                *e = entry;
                true
            }
            None => {
                self.entries.insert(key, entry);
                true
            }
        }
    }

    /// Mark a vertex expanded. Returns `false` if it was already closed or
    /// was never recorded.
    pub fn close(&mut self, key: PosKey) -> bool {
        match self.entries.get_mut(&key) {
            Some(e) if !e.closed => {
                e.closed = true;
                true
            }
            _ => false,
        }
    }

    /// Follow parent pointers from `key` back to its root.
    ///
    /// Returns `(vertex, via)` pairs in start-to-`key` order, or an empty
    /// list if `key` is unknown.
    pub fn trace(&self, key: PosKey) -> Vec<(PosKey, Option<TransportId>)> {
        let mut out = Vec::new();
        let mut cur = key;
        while cur != NO_PARENT {
            let Some(e) = self.entries.get(&cur) else {
                break;
            };
            out.push((cur, e.via));
            // Parents only ever point at vertices recorded earlier, so a
            // trace longer than the ledger means corruption.
            if out.len() > self.entries.len() {
                log::warn!("parent cycle while tracing from {key}");
                return Vec::new();
            }
            cur = e.parent;
        }
        out.reverse();
        out
    }

    /// Number of recorded vertices, blacklisted ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relax_requires_strict_improvement() {
        let mut l = SearchLedger::new();
        assert!(l.seed(1, None));
        assert!(l.relax(2, 10, 1, None, 0));
        assert!(!l.relax(2, 10, 1, None, 0));
        assert!(l.relax(2, 9, 1, None, 0));
        assert_eq!(l.cost(2), Some(9));
    }

    #[test]
    fn closed_entries_never_change() {
        let mut l = SearchLedger::new();
        l.seed(1, None);
        l.relax(2, 10, 1, None, 0);
        assert!(l.close(2));
        assert!(!l.close(2));
        assert!(!l.relax(2, 1, 1, None, 0));
        assert_eq!(l.cost(2), Some(10));
    }

    #[test]
    fn forbidden_vertices_block_everything() {
        let mut l = SearchLedger::new();
        l.forbid(5);
        assert!(!l.seed(5, None));
        assert!(!l.relax(5, 0, 1, None, 0));
        assert!(!l.close(5));
        assert_eq!(l.cost(5), Some(BLACKLISTED));
        assert!(l.is_closed(5));
    }

    #[test]
    fn trace_follows_parents() {
        let mut l = SearchLedger::new();
        l.seed(1, Some(TransportId(4)));
        l.relax(2, 10, 1, None, 0);
        l.relax(3, 20, 2, Some(TransportId(0)), 1);
        assert_eq!(
            l.trace(3),
            vec![
                (1, Some(TransportId(4))),
                (2, None),
                (3, Some(TransportId(0)))
            ]
        );
        assert!(l.trace(99).is_empty());
    }

    #[test]
    fn seeding_twice_is_rejected() {
        let mut l = SearchLedger::new();
        assert!(l.seed(1, None));
        assert!(!l.seed(1, Some(TransportId(0))));
        assert_eq!(l.get(1).and_then(|e| e.via), None);
    }
}
