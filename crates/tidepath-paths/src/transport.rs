//! Non-adjacent edges: teleports, shortcuts, ferries.
//!
//! A [`TransportGraph`] is loaded from a [`TransportSource`] before a search
//! and read-only during it. Availability (skills, items, quests) is decided
//! by the source; the graph only indexes edges flagged available.

use rustc_hash::FxHashMap;
use tidepath_core::{CollisionMap, PosKey, Position};

use crate::bfs;

/// A one-way edge from `origin` to `destination`.
///
/// A transport without an origin can be used from anywhere (a spell or an
/// item teleport); its destination becomes an extra start for walks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transport {
    pub origin: Option<Position>,
    pub destination: Position,
    /// Time the transport takes, in ticks. Never negative once inserted.
    pub duration: i32,
    pub available: bool,
    /// Display name, e.g. the object or spell used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
}

impl Transport {
    /// An available transport between two tiles.
    pub fn new(origin: Position, destination: Position, duration: i32) -> Self {
        Self {
            origin: Some(origin),
            destination,
            duration,
            available: true,
            label: String::new(),
        }
    }

    /// An available transport usable from anywhere.
    pub fn teleport(destination: Position, duration: i32) -> Self {
        Self {
            origin: None,
            destination,
            duration,
            available: true,
            label: String::new(),
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

/// Index of a transport inside one [`TransportGraph`] generation.
///
/// Ids are invalidated by [`TransportGraph::refresh`] and
/// [`TransportGraph::retain_locally_reachable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransportId(pub u32);

/// Supplies the current transports with availability already evaluated.
pub trait TransportSource {
    fn transports(&self) -> Vec<Transport>;
}

impl TransportSource for [Transport] {
    fn transports(&self) -> Vec<Transport> {
        self.to_vec()
    }
}

impl TransportSource for Vec<Transport> {
    fn transports(&self) -> Vec<Transport> {
        self.clone()
    }
}

/// Sparse map from origin vertex to outgoing transports.
#[derive(Debug, Clone, Default)]
pub struct TransportGraph {
    all: Vec<Transport>,
    by_origin: FxHashMap<PosKey, Vec<TransportId>>,
    anywhere: Vec<TransportId>,
}

impl TransportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of transports.
    pub fn from_transports(transports: impl IntoIterator<Item = Transport>) -> Self {
        let mut g = Self::new();
        for t in transports {
            g.insert(t);
        }
        g
    }

    /// Add a transport. Negative durations are clamped to 0; unavailable
    /// transports are stored but never returned by the lookups.
    pub fn insert(&mut self, mut transport: Transport) -> TransportId {
        transport.duration = transport.duration.max(0);
        let id = TransportId(self.all.len() as u32);
        if transport.available {
            match transport.origin {
                Some(origin) => self.by_origin.entry(origin.key()).or_default().push(id),
                None => self.anywhere.push(id),
            }
        }
        self.all.push(transport);
        id
    }

    /// Drop everything and reload from `source`.
    pub fn refresh<S: TransportSource + ?Sized>(&mut self, source: &S) {
        self.clear();
        for t in source.transports() {
            self.insert(t);
        }
        log::debug!(
            "transport graph refreshed: {} stored, {} available",
            self.all.len(),
            self.available_len()
        );
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.by_origin.clear();
        self.anywhere.clear();
    }

    pub fn get(&self, id: TransportId) -> Option<&Transport> {
        self.all.get(id.0 as usize)
    }

    /// Available transports leaving the vertex `key`.
    pub fn outgoing(&self, key: PosKey) -> impl Iterator<Item = (TransportId, &Transport)> + '_ {
        self.by_origin
            .get(&key)
            .into_iter()
            .flatten()
            .map(move |&id| (id, &self.all[id.0 as usize]))
    }

    /// Available transports usable from anywhere.
    pub fn anywhere(&self) -> impl Iterator<Item = (TransportId, &Transport)> + '_ {
        self.anywhere
            .iter()
            .map(move |&id| (id, &self.all[id.0 as usize]))
    }

    /// Number of stored transports, available or not.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Number of transports visible to a search.
    pub fn available_len(&self) -> usize {
        self.anywhere.len() + self.by_origin.values().map(Vec::len).sum::<usize>()
    }

    /// Discard transports whose destination cannot be walked to from `from`
    /// within `budget` expanded tiles. Returns how many were removed.
    ///
    /// This reindexes the graph, so earlier [`TransportId`]s are invalid
    /// afterwards.
    pub fn retain_locally_reachable<M: CollisionMap>(
        &mut self,
        map: &M,
        from: Position,
        budget: usize,
    ) -> usize {
        let reachable = bfs::reachable_within(map, from, budget);
        let before = self.all.len();
        let kept: Vec<Transport> = std::mem::take(&mut self.all)
            .into_iter()
            .filter(|t| reachable.contains_key(&t.destination.key()))
            .collect();
        self.clear();
        for t in kept {
            self.insert(t);
        }
        let removed = before - self.all.len();
        log::debug!(
            "pruned {removed} transports not reachable from {from} within {budget} tiles"
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidepath_core::{CollisionGrid, Range};

    fn p(x: i32, y: i32) -> Position {
        Position::ground(x, y)
    }

    #[test]
    fn outgoing_by_origin() {
        let mut g = TransportGraph::new();
        g.insert(Transport::new(p(1, 1), p(9, 9), 3));
        g.insert(Transport::new(p(1, 1), p(5, 5), 1).labelled("ladder"));
        g.insert(Transport::new(p(2, 2), p(0, 0), 1));

        let out: Vec<_> = g.outgoing(p(1, 1).key()).map(|(_, t)| t.destination).collect();
        assert_eq!(out, vec![p(9, 9), p(5, 5)]);
        assert_eq!(g.outgoing(p(3, 3).key()).count(), 0);
        assert_eq!(g.available_len(), 3);
    }

    #[test]
    fn unavailable_edges_are_invisible() {
        let mut g = TransportGraph::new();
        let id = g.insert(Transport::new(p(1, 1), p(9, 9), 3).with_available(false));
        g.insert(Transport::teleport(p(4, 4), 2).with_available(false));
        assert_eq!(g.outgoing(p(1, 1).key()).count(), 0);
        assert_eq!(g.anywhere().count(), 0);
        assert_eq!(g.len(), 2);
        assert_eq!(g.available_len(), 0);
        assert!(g.get(id).is_some());
    }

    #[test]
    fn negative_duration_clamped() {
        let mut g = TransportGraph::new();
        let id = g.insert(Transport::new(p(0, 0), p(1, 1), -20));
        assert_eq!(g.get(id).map(|t| t.duration), Some(0));
    }

    #[test]
    fn refresh_replaces_contents() {
        let mut g = TransportGraph::from_transports([Transport::new(p(0, 0), p(1, 1), 1)]);
        let fresh = vec![
            Transport::teleport(p(7, 7), 4).labelled("home"),
            Transport::new(p(3, 3), p(4, 4), 1).with_available(false),
        ];
        g.refresh(&fresh);
        assert_eq!(g.len(), 2);
        assert_eq!(g.outgoing(p(0, 0).key()).count(), 0);
        let anywhere: Vec<_> = g.anywhere().map(|(_, t)| t.label.as_str()).collect();
        assert_eq!(anywhere, vec!["home"]);
    }

    #[test]
    fn retain_locally_reachable_drops_far_destinations() {
        let mut grid = CollisionGrid::new().with_plane(0, Range::new(0, 0, 20, 5));
        // Wall off x >= 10.
        grid.fill_solid(Range::new(10, 0, 11, 5), 0);
        let mut g = TransportGraph::from_transports([
            Transport::new(p(0, 0), p(3, 3), 1).labelled("near"),
            Transport::new(p(0, 0), p(15, 2), 1).labelled("walled"),
            Transport::teleport(p(9, 4), 1).labelled("edge"),
        ]);
        let removed = g.retain_locally_reachable(&grid, p(0, 0), 1_000);
        assert_eq!(removed, 1);
        let labels: Vec<_> = g
            .outgoing(p(0, 0).key())
            .chain(g.anywhere())
            .map(|(_, t)| t.label.clone())
            .collect();
        assert_eq!(labels, vec!["near".to_string(), "edge".to_string()]);
    }
}
