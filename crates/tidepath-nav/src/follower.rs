//! Tick-driven route following: [`RoutePlanner`], [`Mover`],
//! [`StepFollower`].

use tidepath_core::Position;
use tidepath_paths::{Waypoint, chebyshev};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Produces waypoints from the agent's current tile. An empty list means no
/// route exists.
pub trait RoutePlanner {
    fn plan(&mut self, from: Position) -> Vec<Waypoint>;
}

impl<F: FnMut(Position) -> Vec<Waypoint>> RoutePlanner for F {
    fn plan(&mut self, from: Position) -> Vec<Waypoint> {
        self(from)
    }
}

/// Executes movement for the agent being steered.
pub trait Mover {
    /// Tile the agent's anchor currently occupies.
    fn position(&self) -> Position;

    /// Issue one movement command toward `waypoint`. When the waypoint
    /// carries a transport, the command is to take it. Arrival is detected
    /// on a later tick through [`Mover::position`].
    fn step_towards(&mut self, waypoint: &Waypoint);
}

// ---------------------------------------------------------------------------
// StepFollower
// ---------------------------------------------------------------------------

/// Where a [`StepFollower`] is in its route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FollowState {
    /// No active route; the next tick plans one.
    #[default]
    Idle,
    Advancing,
    Arrived,
    /// The planner returned no route.
    Failed,
}

impl FollowState {
    /// `Arrived` or `Failed`: nothing happens until [`StepFollower::reset`].
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Arrived | Self::Failed)
    }
}

/// Walks a waypoint list one tick at a time.
///
/// Each [`tick`](Self::tick) makes at most one state transition and never
/// blocks, so it can be driven from a game loop.
#[derive(Debug, Clone, Default)]
pub struct StepFollower {
    waypoints: Vec<Waypoint>,
    cursor: usize,
    state: FollowState,
    tolerance: i32,
}

impl StepFollower {
    /// A follower that counts a waypoint reached once the agent is within
    /// `tolerance` tiles of it (Chebyshev, same level).
    pub fn new(tolerance: i32) -> Self {
        Self {
            tolerance: tolerance.max(0),
            ..Self::default()
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    /// Remaining waypoints, the current target first.
    pub fn remaining(&self) -> &[Waypoint] {
        self.waypoints.get(self.cursor..).unwrap_or(&[])
    }

    pub fn current(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.cursor)
    }

    fn reached(&self, at: Position, w: &Waypoint) -> bool {
        at.level == w.position.level && chebyshev(at.point(), w.position.point()) <= self.tolerance
    }

    /// Advance by one tick.
    pub fn tick<P, M>(&mut self, planner: &mut P, mover: &mut M) -> FollowState
    where
        P: RoutePlanner + ?Sized,
        M: Mover + ?Sized,
    {
        match self.state {
            FollowState::Idle => {
                let from = mover.position();
                self.waypoints = planner.plan(from);
                self.cursor = 0;
                self.state = if self.waypoints.is_empty() {
                    log::debug!("follower: no route from {from}");
                    FollowState::Failed
                } else {
                    log::debug!("follower: {} waypoints from {from}", self.waypoints.len());
                    FollowState::Advancing
                };
            }
            FollowState::Advancing => {
                let at = mover.position();
                if self.current().is_some_and(|w| self.reached(at, w)) {
                    self.cursor += 1;
                }
                match self.waypoints.get(self.cursor) {
                    Some(w) => mover.step_towards(w),
                    None => {
                        log::debug!("follower: arrived at {at}");
                        self.waypoints.clear();
                        self.cursor = 0;
                        self.state = FollowState::Arrived;
                    }
                }
            }
            FollowState::Arrived | FollowState::Failed => {}
        }
        self.state
    }

    /// Drop any route and return to [`FollowState::Idle`].
    pub fn reset(&mut self) {
        self.waypoints.clear();
        self.cursor = 0;
        self.state = FollowState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidepath_core::Direction;

    /// Moves one tile per command straight at the waypoint.
    struct Dinghy {
        at: Position,
        commands: usize,
    }

    impl Mover for Dinghy {
        fn position(&self) -> Position {
            self.at
        }

        fn step_towards(&mut self, w: &Waypoint) {
            let d = w.position.point() - self.at.point();
            if let Some(dir) = Direction::from_delta(d.x, d.y) {
                self.at = self.at.offset(dir.delta());
            }
            self.commands += 1;
        }
    }

    fn p(x: i32, y: i32) -> Position {
        Position::ground(x, y)
    }

    fn wp(x: i32, y: i32) -> Waypoint {
        Waypoint::new(p(x, y), None)
    }

    #[test]
    fn plans_then_advances_then_arrives() {
        let mut f = StepFollower::new(0);
        let mut boat = Dinghy {
            at: p(0, 0),
            commands: 0,
        };
        let mut planner = |_: Position| vec![wp(0, 0), wp(3, 0), wp(3, 2)];

        assert_eq!(f.tick(&mut planner, &mut boat), FollowState::Advancing);
        assert_eq!(boat.commands, 0);
        assert_eq!(f.remaining().len(), 3);

        let mut ticks = 0;
        while f.tick(&mut planner, &mut boat) == FollowState::Advancing {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert_eq!(f.state(), FollowState::Arrived);
        assert_eq!(boat.at, p(3, 2));
        assert_eq!(boat.commands, 5);
        assert!(f.remaining().is_empty());
    }

    #[test]
    fn empty_plan_fails_and_sticks() {
        let mut f = StepFollower::new(0);
        let mut boat = Dinghy {
            at: p(4, 4),
            commands: 0,
        };
        let mut calls = 0;
        let mut planner = |_: Position| {
            calls += 1;
            Vec::<Waypoint>::new()
        };
        assert_eq!(f.tick(&mut planner, &mut boat), FollowState::Failed);
        assert_eq!(f.tick(&mut planner, &mut boat), FollowState::Failed);
        assert!(f.state().is_finished());
        drop(planner);
        assert_eq!(calls, 1);
        assert_eq!(boat.commands, 0);
    }

    #[test]
    fn tolerance_counts_nearby_as_reached() {
        let mut f = StepFollower::new(1);
        let mut boat = Dinghy {
            at: p(0, 0),
            commands: 0,
        };
        let mut planner = |_: Position| vec![wp(5, 0)];
        f.tick(&mut planner, &mut boat);
        while f.tick(&mut planner, &mut boat) == FollowState::Advancing {}
        assert_eq!(boat.at, p(4, 0));
    }

    #[test]
    fn other_level_is_not_reached() {
        let f = StepFollower::new(3);
        assert!(!f.reached(Position::new(1, 1, 1), &wp(1, 1)));
        assert!(f.reached(p(2, 2), &wp(1, 1)));
    }

    #[test]
    fn reset_replans() {
        let mut f = StepFollower::new(0);
        let mut boat = Dinghy {
            at: p(1, 1),
            commands: 0,
        };
        let mut planner = |from: Position| vec![Waypoint::new(from, None)];
        f.tick(&mut planner, &mut boat);
        assert_eq!(f.tick(&mut planner, &mut boat), FollowState::Arrived);
        assert_eq!(f.tick(&mut planner, &mut boat), FollowState::Arrived);
        f.reset();
        assert_eq!(f.state(), FollowState::Idle);
        assert_eq!(f.tick(&mut planner, &mut boat), FollowState::Advancing);
    }
}
