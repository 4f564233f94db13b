//! Per-search snapshot context tying the map, transports and config
//! together.

use tidepath_core::{CollisionMap, Heading, Point, Position};
use tidepath_paths::{
    CostShaping, HullProfile, Route, SailOutcome, SearchConfig, Target, TransportGraph,
    TransportSource, WalkRequest, Walker, Waypoint, sail_path, simplify, simplify_route,
};

/// Hull offsets and heading captured from a vessel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HullSnapshot {
    pub offsets: Vec<Point>,
    pub heading: Heading,
}

/// Answers "what does the agent's vessel look like right now".
pub trait VesselQuery {
    /// The current hull, or `None` when the agent is not aboard.
    fn hull(&self) -> Option<HullSnapshot>;
}

impl VesselQuery for HullSnapshot {
    fn hull(&self) -> Option<HullSnapshot> {
        Some(self.clone())
    }
}

impl VesselQuery for Option<HullSnapshot> {
    fn hull(&self) -> Option<HullSnapshot> {
        self.clone()
    }
}

/// Borrowed collision map plus owned transports and config.
///
/// Refresh or prune transports between searches; the searches themselves
/// only read the navigator, so one navigator can serve several threads.
#[derive(Debug)]
pub struct Navigator<'a, M: CollisionMap + ?Sized> {
    map: &'a M,
    transports: TransportGraph,
    config: SearchConfig,
}

impl<'a, M: CollisionMap + ?Sized> Navigator<'a, M> {
    pub fn new(map: &'a M) -> Self {
        Self::with_config(map, SearchConfig::default())
    }

    pub fn with_config(map: &'a M, config: SearchConfig) -> Self {
        Self {
            map,
            transports: TransportGraph::new(),
            config,
        }
    }

    pub fn map(&self) -> &'a M {
        self.map
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    pub fn transports(&self) -> &TransportGraph {
        &self.transports
    }

    /// Replace the transports with a fresh load from `source`.
    pub fn refresh_transports<S: TransportSource + ?Sized>(&mut self, source: &S) {
        self.transports.refresh(source);
    }

    /// Drop transports whose destination is not walkable from `from` within
    /// `budget` tiles. Returns how many were dropped.
    pub fn prune_transports(&mut self, from: Position, budget: usize) -> usize {
        let map = self.map;
        self.transports.retain_locally_reachable(&map, from, budget)
    }

    /// Run the walker.
    pub fn walk(&self, request: &WalkRequest) -> Route {
        Walker::new(self.map, &self.transports, &self.config).route(request)
    }

    /// Run the walker and simplify the route. Waypoints reached through a
    /// transport carry it.
    pub fn walk_waypoints(&self, request: &WalkRequest) -> Vec<Waypoint> {
        simplify_route(&self.walk(request))
    }

    /// Run the hull search for `vessel`. Empty when the agent is not aboard.
    pub fn sail<V: VesselQuery + ?Sized>(
        &self,
        vessel: &V,
        start: Position,
        target: Position,
        shaping: &CostShaping,
    ) -> SailOutcome {
        let Some(snapshot) = vessel.hull() else {
            log::debug!("sail rejected: not aboard a vessel");
            return SailOutcome::default();
        };
        let hull = HullProfile::new(snapshot.offsets, snapshot.heading);
        sail_path(self.map, &hull, start, target, shaping, &self.config)
    }

    /// [`sail`](Self::sail), simplified to waypoints.
    pub fn sail_waypoints<V: VesselQuery + ?Sized>(
        &self,
        vessel: &V,
        start: Position,
        target: Position,
        shaping: &CostShaping,
    ) -> Vec<Waypoint> {
        simplify(&self.sail(vessel, start, target, shaping).path)
    }

    /// A planner for [`StepFollower`](crate::StepFollower) that walks to
    /// `target` from wherever the agent stands when it plans.
    pub fn walk_planner(&self, target: Target) -> impl FnMut(Position) -> Vec<Waypoint> + '_ {
        move |from| match WalkRequest::new(from, target.clone()) {
            Ok(req) => self.walk_waypoints(&req),
            Err(e) => {
                log::debug!("walk planner: {e}");
                Vec::new()
            }
        }
    }

    /// A planner that sails `vessel` to `target`.
    pub fn sail_planner<'s, V: VesselQuery + ?Sized>(
        &'s self,
        vessel: &'s V,
        target: Position,
        shaping: CostShaping,
    ) -> impl FnMut(Position) -> Vec<Waypoint> + 's {
        move |from| self.sail_waypoints(vessel, from, target, &shaping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidepath_core::{CollisionGrid, Direction, Range};
    use tidepath_paths::Transport;

    fn p(x: i32, y: i32) -> Position {
        Position::ground(x, y)
    }

    fn sea() -> CollisionGrid {
        CollisionGrid::new().with_plane(0, Range::new(0, 0, 30, 30))
    }

    #[test]
    fn not_aboard_is_empty() {
        let g = sea();
        let nav = Navigator::new(&g);
        let out = nav.sail(&None::<HullSnapshot>, p(1, 1), p(5, 5), &CostShaping::Uniform);
        assert!(out.is_empty());
    }

    #[test]
    fn sail_waypoints_are_simplified() {
        let g = sea();
        let nav = Navigator::new(&g);
        let skiff = HullSnapshot {
            offsets: vec![Point::ZERO],
            heading: Direction::East.heading(),
        };
        let ws = nav.sail_waypoints(&skiff, p(2, 2), p(12, 2), &CostShaping::Uniform);
        assert_eq!(ws.len(), 2);
        assert_eq!(ws[1].position, p(12, 2));
        assert_eq!(ws[1].heading, Some(Direction::East));
    }

    #[test]
    fn refresh_and_prune() {
        let mut g = sea();
        g.fill_solid(Range::new(15, 0, 16, 30), 0);
        let mut nav = Navigator::new(&g);
        let loaded = vec![
            Transport::new(p(1, 1), p(10, 10), 1),
            Transport::new(p(1, 1), p(20, 20), 1),
        ];
        nav.refresh_transports(&loaded);
        assert_eq!(nav.transports().len(), 2);
        assert_eq!(nav.prune_transports(p(1, 1), 10_000), 1);
        assert_eq!(nav.transports().len(), 1);
    }

    #[test]
    fn walk_waypoints_keep_transports() {
        let g = CollisionGrid::new().with_plane(0, Range::new(0, 0, 80, 5));
        let mut nav = Navigator::new(&g);
        let canoe = Transport::new(p(5, 2), p(60, 2), 2).labelled("canoe");
        nav.refresh_transports(&vec![canoe.clone()]);
        let req = WalkRequest::new(p(0, 2), Target::Point(p(64, 2))).unwrap();
        let ws = nav.walk_waypoints(&req);
        let tiles: Vec<Position> = ws.iter().map(|w| w.position).collect();
        assert_eq!(tiles, vec![p(0, 2), p(5, 2), p(60, 2), p(64, 2)]);
        assert_eq!(ws[2].transport, Some(canoe));
    }

    #[test]
    fn walk_planner_uses_current_position() {
        let g = sea();
        let nav = Navigator::new(&g);
        let mut plan = nav.walk_planner(Target::Point(p(5, 0)));
        let ws = plan(p(0, 0));
        assert_eq!(ws.last().map(|w| w.position), Some(p(5, 0)));
        assert!(plan(p(-3, 0)).is_empty());
    }
}
