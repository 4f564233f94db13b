//! Reduce a tile path to the tiles where its heading changes.

use tidepath_core::{Direction, Position};

use crate::astar::Route;
use crate::transport::Transport;

/// A tile the agent should steer to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub position: Position,
    /// Heading of the segment ending here; `None` for the first tile, for
    /// transport jumps and for any non-compass move.
    pub heading: Option<Direction>,
    /// Transport that carries the agent onto this tile from the previous
    /// waypoint. On the first waypoint it is the teleport that starts the
    /// route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transport: Option<Transport>,
}

impl Waypoint {
    pub fn new(position: Position, heading: Option<Direction>) -> Self {
        Self {
            position,
            heading,
            transport: None,
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }
}

/// Compass heading from `a` to `b`, if they share a level and the delta is
/// a whole multiple of one direction.
pub fn segment_heading(a: Position, b: Position) -> Option<Direction> {
    if a.level != b.level {
        return None;
    }
    Direction::along(b.x - a.x, b.y - a.y)
}

/// Keep the first tile, every tile where the segment heading changes, and
/// the last tile. Repeated tiles collapse into one.
///
/// Non-compass segments never merge with anything, so a transport jump
/// always keeps both of its ends. Applying `simplify` to the positions of
/// its own output changes nothing.
pub fn simplify(path: &[Position]) -> Vec<Waypoint> {
    reduce(path.iter().map(|&p| (p, None)).collect())
}

/// [`simplify`] for a walk, tagging the waypoints its transports lead to.
///
/// Every hop keeps its origin and its destination, even when the jump is a
/// straight compass line, and the destination carries the transport. A
/// route seeded by a teleport starts at the teleport's destination, which
/// carries [`Route::first_transport`].
pub fn simplify_route(route: &Route) -> Vec<Waypoint> {
    let mut steps: Vec<(Position, Option<Transport>)> =
        route.path.iter().map(|&p| (p, None)).collect();
    if let Some(first) = steps.first_mut() {
        first.1 = route.first_transport.clone();
    }
    for hop in &route.hops {
        if let Some(step) = steps.get_mut(hop.index) {
            step.1 = Some(hop.transport.clone());
        }
    }
    reduce(steps)
}

fn waypoint(position: Position, heading: Option<Direction>, via: Option<Transport>) -> Waypoint {
    Waypoint {
        position,
        heading,
        transport: via,
    }
}

fn reduce(mut steps: Vec<(Position, Option<Transport>)>) -> Vec<Waypoint> {
    steps.dedup_by(|cur, prev| cur.0 == prev.0 && cur.1.is_none());
    let Some(((first, first_via), rest)) = steps.split_first() else {
        return Vec::new();
    };
    let mut out = vec![waypoint(*first, None, first_via.clone())];
    let (mut prev, mut prev_via) = (*first, first_via);
    let mut run: Option<Direction> = None;

    for (i, (cur, via)) in rest.iter().enumerate() {
        let cur = *cur;
        let heading = match via {
            Some(_) => None,
            None => segment_heading(prev, cur),
        };
        let last = i + 1 == rest.len();
        match (heading, run) {
            (Some(h), Some(r)) if h == r => {
                // Same straight run: only the end of the path is kept.
                if last {
                    out.push(waypoint(cur, heading, via.clone()));
                }
            }
            _ => {
                // The run so far ends at `prev`.
                if out.last().map(|w| w.position) != Some(prev) {
                    out.push(waypoint(prev, run, prev_via.clone()));
                }
                if last {
                    out.push(waypoint(cur, heading, via.clone()));
                }
            }
        }
        run = heading;
        prev = cur;
        prev_via = via;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::Hop;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(x: i32, y: i32) -> Position {
        Position::ground(x, y)
    }

    fn positions(ws: &[Waypoint]) -> Vec<Position> {
        ws.iter().map(|w| w.position).collect()
    }

    #[test]
    fn empty_and_single() {
        assert!(simplify(&[]).is_empty());
        assert_eq!(simplify(&[p(3, 3)]), vec![Waypoint::new(p(3, 3), None)]);
    }

    #[test]
    fn straight_diagonal_is_two_waypoints() {
        let w = simplify(&[p(0, 0), p(1, 1), p(2, 2)]);
        assert_eq!(
            w,
            vec![
                Waypoint::new(p(0, 0), None),
                Waypoint::new(p(2, 2), Some(Direction::SouthEast)),
            ]
        );
    }

    #[test]
    fn keeps_turns() {
        let path = [p(0, 0), p(1, 0), p(2, 0), p(3, 1), p(4, 2), p(4, 3)];
        let w = simplify(&path);
        assert_eq!(positions(&w), vec![p(0, 0), p(2, 0), p(4, 2), p(4, 3)]);
        assert_eq!(w[1].heading, Some(Direction::East));
        assert_eq!(w[2].heading, Some(Direction::SouthEast));
        assert_eq!(w[3].heading, Some(Direction::South));
    }

    #[test]
    fn transport_jump_keeps_both_ends() {
        let path = [p(0, 0), p(1, 0), p(9, 3), p(10, 3), p(11, 3)];
        let w = simplify(&path);
        assert_eq!(positions(&w), vec![p(0, 0), p(1, 0), p(9, 3), p(11, 3)]);
        assert_eq!(w[2].heading, None);

        let up = [p(5, 5), Position::new(5, 5, 1), Position::new(5, 6, 1)];
        assert_eq!(positions(&simplify(&up)), up.to_vec());
    }

    #[test]
    fn straight_transport_keeps_its_origin() {
        let canoe = Transport::new(p(5, 2), p(60, 2), 2).labelled("canoe");
        let mut path: Vec<Position> = (0..=5).map(|x| p(x, 2)).collect();
        path.extend((60..=64).map(|x| p(x, 2)));
        let route = Route {
            path,
            hops: vec![Hop {
                index: 6,
                transport: canoe.clone(),
            }],
            ..Route::default()
        };

        let w = simplify_route(&route);
        assert_eq!(positions(&w), vec![p(0, 2), p(5, 2), p(60, 2), p(64, 2)]);
        assert_eq!(w[1].heading, Some(Direction::East));
        assert_eq!(w[1].transport, None);
        assert_eq!(w[2].heading, None);
        assert_eq!(w[2].transport, Some(canoe));
        assert_eq!(w[3].heading, Some(Direction::East));
        assert_eq!(w[3].transport, None);

        // Without the hop the same tiles look like one straight line.
        assert_eq!(positions(&simplify(&route.path)), vec![p(0, 2), p(64, 2)]);
    }

    #[test]
    fn teleport_seed_tags_the_first_waypoint() {
        let home = Transport::teleport(p(10, 10), 4).labelled("home");
        let route = Route {
            path: vec![p(10, 10), p(11, 10), p(12, 10)],
            first_transport: Some(home.clone()),
            ..Route::default()
        };
        let w = simplify_route(&route);
        assert_eq!(positions(&w), vec![p(10, 10), p(12, 10)]);
        assert_eq!(w[0].transport, Some(home));
        assert_eq!(w[1].transport, None);
    }

    #[test]
    fn hop_at_the_end_of_the_route() {
        let ladder = Transport::new(p(2, 0), Position::new(2, 0, 1), 1);
        let route = Route {
            path: vec![p(0, 0), p(1, 0), p(2, 0), Position::new(2, 0, 1)],
            hops: vec![Hop {
                index: 3,
                transport: ladder.clone(),
            }],
            ..Route::default()
        };
        let w = simplify_route(&route);
        assert_eq!(positions(&w), vec![p(0, 0), p(2, 0), Position::new(2, 0, 1)]);
        assert_eq!(w[2].transport, Some(ladder));
    }

    #[test]
    fn repeated_tiles_collapse() {
        let path = [p(0, 0), p(1, 0), p(1, 0), p(2, 0), p(2, 0)];
        assert_eq!(positions(&simplify(&path)), vec![p(0, 0), p(2, 0)]);
    }

    #[test]
    fn idempotent_on_random_walks() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut cur = p(100, 100);
            let mut path = vec![cur];
            for _ in 0..rng.random_range(0..40) {
                if rng.random_range(0..10) == 0 {
                    cur = cur.shift(rng.random_range(-9..10), rng.random_range(-9..10));
                } else {
                    let d = Direction::from_index(rng.random_range(0..8));
                    for _ in 0..rng.random_range(1..4) {
                        cur = cur.offset(d.delta());
                    }
                }
                path.push(cur);
            }
            let once = positions(&simplify(&path));
            let twice = positions(&simplify(&once));
            assert_eq!(once, twice);
            assert_eq!(once.first(), path.first());
            assert_eq!(once.last(), path.last());
        }
    }
}
