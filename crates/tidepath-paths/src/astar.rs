//! A* for single-tile walkers, with transports as extra edges.

use std::fmt;

use rustc_hash::FxHashSet;
use tidepath_core::{CollisionMap, CoordError, Direction, PosKey, Position};

use crate::config::SearchConfig;
use crate::distance::octile;
use crate::frontier::Frontier;
use crate::ledger::{SearchLedger, SearchStats};
use crate::transport::{Transport, TransportGraph};

/// Where a walk should end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One exact tile.
    Point(Position),
    /// Any tile of the set, e.g. the admissible boundary of an area.
    Area(Vec<Position>),
}

impl Target {
    fn positions(&self) -> &[Position] {
        match self {
            Self::Point(p) => std::slice::from_ref(p),
            Self::Area(ps) => ps,
        }
    }
}

/// Why a [`WalkRequest`] could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// The request had no start positions.
    NoStarts,
    /// A start or target lies outside the packable range.
    Coord(CoordError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStarts => write!(f, "walk request has no start positions"),
            Self::Coord(e) => write!(f, "invalid walk request: {e}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Coord(e) => Some(e),
            Self::NoStarts => None,
        }
    }
}

impl From<CoordError> for RequestError {
    fn from(e: CoordError) -> Self {
        Self::Coord(e)
    }
}

/// A validated walk query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRequest {
    starts: Vec<Position>,
    target: Target,
    blacklist: Vec<Position>,
    use_teleports: bool,
}

impl WalkRequest {
    /// A walk from one start. Teleports are used by default.
    pub fn new(start: Position, target: Target) -> Result<Self, RequestError> {
        Self::from_starts(vec![start], target)
    }

    /// A walk from several candidate starts, all seeded at cost 0.
    pub fn from_starts(starts: Vec<Position>, target: Target) -> Result<Self, RequestError> {
        if starts.is_empty() {
            return Err(RequestError::NoStarts);
        }
        for p in starts.iter().chain(target.positions()) {
            p.validate()?;
        }
        Ok(Self {
            starts,
            target,
            blacklist: Vec::new(),
            use_teleports: true,
        })
    }

    /// Vertices the route must never touch. Tiles outside the packable
    /// range cannot lie on any route and are dropped.
    pub fn avoiding(mut self, tiles: impl IntoIterator<Item = Position>) -> Self {
        self.blacklist.extend(tiles.into_iter().filter(|p| p.is_valid()));
        self
    }

    /// Whether origin-less transports seed extra starts.
    pub fn with_teleports(mut self, on: bool) -> Self {
        self.use_teleports = on;
        self
    }

    pub fn starts(&self) -> &[Position] {
        &self.starts
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

/// A transport taken along a route: `path[index]` is reached from
/// `path[index - 1]` through `transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub index: usize,
    pub transport: Transport,
}

/// Result of a walk. Empty when no route exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// Tiles from the winning start to the target, both included.
    pub path: Vec<Position>,
    pub cost: i32,
    pub hops: Vec<Hop>,
    /// Set when the winning start was a teleport destination: the agent must
    /// use this transport before walking `path`.
    pub first_transport: Option<Transport>,
    pub stats: SearchStats,
}

impl Route {
    fn empty(stats: SearchStats) -> Self {
        Self {
            stats,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The path without its start tile.
    pub fn steps(&self) -> &[Position] {
        self.path.get(1..).unwrap_or(&[])
    }

    pub fn start(&self) -> Option<Position> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<Position> {
        self.path.last().copied()
    }
}

struct Goals {
    keys: FxHashSet<PosKey>,
    points: Vec<Position>,
}

impl Goals {
    fn new(target: &Target, ledger: &SearchLedger) -> Self {
        let mut keys = FxHashSet::default();
        let mut points = Vec::new();
        for &p in target.positions() {
            let k = p.key();
            if !ledger.is_closed(k) && keys.insert(k) {
                points.push(p);
            }
        }
        Self { keys, points }
    }
}

/// Walk searches over one collision/transport snapshot.
pub struct Walker<'a, M: CollisionMap + ?Sized> {
    map: &'a M,
    transports: &'a TransportGraph,
    config: &'a SearchConfig,
}

impl<'a, M: CollisionMap + ?Sized> Walker<'a, M> {
    pub fn new(map: &'a M, transports: &'a TransportGraph, config: &'a SearchConfig) -> Self {
        Self {
            map,
            transports,
            config,
        }
    }

    /// Admissible estimate from `p` to the nearest goal.
    fn estimate(&self, p: Position, goals: &Goals) -> i32 {
        let cfg = self.config;
        goals
            .points
            .iter()
            .map(|g| {
                octile(p.point(), g.point(), cfg.orthogonal_cost, cfg.diagonal_cost)
                    .saturating_add(cfg.level_penalty.saturating_mul((p.level - g.level).abs()))
            })
            .min()
            .unwrap_or(0)
    }

    /// Find the cheapest route for `req`.
    ///
    /// Never fails: an unreachable target, an empty target set, missing
    /// terrain or an exhausted node budget all produce an empty route.
    pub fn route(&self, req: &WalkRequest) -> Route {
        let mut stats = SearchStats::default();
        let mut ledger = SearchLedger::new();
        for p in &req.blacklist {
            ledger.forbid(p.key());
        }

        let goals = Goals::new(&req.target, &ledger);
        if goals.points.is_empty() {
            log::debug!("walk rejected: no reachable target tiles");
            return Route::empty(stats);
        }

        let mut frontier = Frontier::new();
        let teleports = self
            .transports
            .anywhere()
            .filter(|_| req.use_teleports)
            .map(|(id, t)| (t.destination, Some(id)));
        let seeds = req.starts.iter().map(|&s| (s, None)).chain(teleports);
        for (pos, via) in seeds {
            if !pos.is_valid() || !self.map.has_level(pos.level) {
                continue;
            }
            if ledger.seed(pos.key(), via) {
                frontier.push(pos.key(), self.estimate(pos, &goals));
                stats.pushed += 1;
            }
        }
        if frontier.is_empty() {
            log::debug!("walk rejected: no start has terrain data");
            return Route::empty(stats);
        }

        log::debug!(
            "walk search: {} seeds, {} goal tiles",
            frontier.len(),
            goals.points.len()
        );

        while let Some((key, _)) = frontier.pop() {
            if !ledger.close(key) {
                continue;
            }
            stats.expanded += 1;

            if goals.keys.contains(&key) {
                return self.reconstruct(&ledger, key, stats);
            }
            if stats.expanded >= self.config.max_expanded {
                stats.exhausted = true;
                log::info!(
                    "walk search gave up after {} expanded nodes",
                    stats.expanded
                );
                return Route::empty(stats);
            }

            let Some(&entry) = ledger.get(key) else {
                continue;
            };
            let pos = Position::from_key(key);

            let flags = self.map.flags(pos.x, pos.y, pos.level);
            if !flags.is_full() {
                let open = flags.is_empty();
                for dir in Direction::ALL {
                    if !open && flags.contains(dir) {
                        continue;
                    }
                    let next = pos.offset(dir.delta());
                    if !next.is_valid() {
                        continue;
                    }
                    let cost = entry
                        .cost
                        .saturating_add(self.config.step_cost(dir.is_diagonal()));
                    let nk = next.key();
                    if ledger.relax(nk, cost, key, None, entry.transports_used) {
                        frontier.push(nk, cost.saturating_add(self.estimate(next, &goals)));
                        stats.pushed += 1;
                    }
                }
            }

            for (id, t) in self.transports.outgoing(key) {
                let chain = entry.transports_used.saturating_add(1);
                let edge = self
                    .config
                    .transport
                    .cost(t.duration, i32::from(chain), frontier.len());
                let cost = entry.cost.saturating_add(edge);
                let dk = t.destination.key();
                if ledger.relax(dk, cost, key, Some(id), chain) {
                    log::trace!("transport {:?} to {} at cost {edge}", t.label, t.destination);
                    frontier.push(dk, cost.saturating_add(self.estimate(t.destination, &goals)));
                    stats.pushed += 1;
                }
            }
        }

        log::debug!(
            "walk search found no route after {} expanded nodes",
            stats.expanded
        );
        Route::empty(stats)
    }

    fn reconstruct(&self, ledger: &SearchLedger, goal: PosKey, stats: SearchStats) -> Route {
        let trace = ledger.trace(goal);
        let mut route = Route::empty(stats);
        route.cost = ledger.cost(goal).unwrap_or(0);
        for (i, &(key, via)) in trace.iter().enumerate() {
            let transport = via.and_then(|id| self.transports.get(id)).cloned();
            match (i, transport) {
                (0, t) => route.first_transport = t,
                (index, Some(transport)) => route.hops.push(Hop { index, transport }),
                _ => {}
            }
            route.path.push(Position::from_key(key));
        }
        log::debug!(
            "walk route: {} tiles, cost {}, {} transports, {} expanded",
            route.path.len(),
            route.cost,
            route.hops.len() + usize::from(route.first_transport.is_some()),
            stats.expanded
        );
        route
    }
}
