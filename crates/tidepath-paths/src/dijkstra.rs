//! Dijkstra over hull anchor positions.
//!
//! The vessel search has no heuristic and no transports. Every step pays
//! the grid step cost times a multiplier chosen by [`CostShaping`]; with
//! proximity shaping, tiles near rocks cost more, which pulls routes into
//! the middle of channels.

use tidepath_core::{CollisionMap, Direction, Position};

use crate::config::{ProximityTiers, SearchConfig};
use crate::frontier::Frontier;
use crate::hull::HullProfile;
use crate::ledger::{SearchLedger, SearchStats};
use crate::proximity::ProximityField;

/// How each vessel step is weighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostShaping {
    /// Plain step costs.
    #[default]
    Uniform,
    /// Step costs scaled by the destination anchor's obstacle distance.
    Proximity(ProximityTiers),
}

impl CostShaping {
    /// Proximity shaping with the default tiers.
    pub fn proximity() -> Self {
        Self::Proximity(ProximityTiers::default())
    }
}

/// Result of a hull search. Empty when no route exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SailOutcome {
    /// Anchor tiles from start to target, both included.
    pub path: Vec<Position>,
    pub cost: i32,
    pub stats: SearchStats,
}

impl SailOutcome {
    fn empty(stats: SearchStats) -> Self {
        Self {
            stats,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Whether the hull can sit at `pos` facing some direction.
fn occupiable<M: CollisionMap + ?Sized>(map: &M, hull: &HullProfile, pos: Position) -> bool {
    Direction::ALL.iter().any(|&d| hull.fits(map, pos, d))
}

/// Cheapest anchor path for `hull` from `start` to `target`.
pub fn sail_path<M: CollisionMap + ?Sized>(
    map: &M,
    hull: &HullProfile,
    start: Position,
    target: Position,
    shaping: &CostShaping,
    config: &SearchConfig,
) -> SailOutcome {
    let mut stats = SearchStats::default();
    if !start.is_valid() || !target.is_valid() {
        log::debug!("sail rejected: {start} -> {target} out of range");
        return SailOutcome::empty(stats);
    }
    if start.level != target.level || !map.has_level(start.level) {
        log::debug!("sail rejected: no water linking level {} to {}", start.level, target.level);
        return SailOutcome::empty(stats);
    }
    if !occupiable(map, hull, target) {
        log::debug!("sail rejected: hull cannot sit at {target}");
        return SailOutcome::empty(stats);
    }

    let limits = &config.hull;
    let mut field = ProximityField::new(config.proximity_radius);
    let mut ledger = SearchLedger::new();
    let mut frontier = Frontier::new();
    let goal = target.key();

    ledger.seed(start.key(), None);
    frontier.push(start.key(), 0);
    stats.pushed += 1;

    log::debug!(
        "sail search: {start} -> {target}, {} hull tiles, {shaping:?}",
        hull.offsets().len()
    );

    while let Some((key, priority)) = frontier.pop() {
        if ledger.cost(key).is_some_and(|c| priority > c) || !ledger.close(key) {
            continue;
        }
        stats.expanded += 1;

        if key == goal {
            let path: Vec<Position> = ledger
                .trace(key)
                .into_iter()
                .map(|(k, _)| Position::from_key(k))
                .collect();
            log::debug!(
                "sail route: {} tiles, cost {priority}, {} expanded, {} proximity samples",
                path.len(),
                stats.expanded,
                field.len()
            );
            return SailOutcome {
                path,
                cost: priority,
                stats,
            };
        }
        if stats.expanded >= limits.max_iterations {
            stats.exhausted = true;
            log::info!("sail search gave up after {} iterations", stats.expanded);
            return SailOutcome::empty(stats);
        }

        let pos = Position::from_key(key);
        let flags = map.flags(pos.x, pos.y, pos.level);
        if flags.is_full() {
            continue;
        }
        for dir in Direction::ALL {
            if flags.contains(dir) {
                continue;
            }
            let next = pos.offset(dir.delta());
            if !next.is_valid() || !hull.fits(map, next, dir) {
                continue;
            }
            let multiplier = match shaping {
                CostShaping::Uniform => 1,
                CostShaping::Proximity(tiers) => tiers.multiplier(field.distance(map, next)),
            };
            let cost = priority.saturating_add(
                config
                    .step_cost(dir.is_diagonal())
                    .saturating_mul(multiplier),
            );
            if ledger.relax(next.key(), cost, key, None, 0) {
                frontier.push(next.key(), cost);
                stats.pushed += 1;
            }
        }

        if frontier.len() > limits.max_heap {
            stats.exhausted = true;
            log::info!("sail search gave up with {} pending entries", frontier.len());
            return SailOutcome::empty(stats);
        }
    }

    log::debug!("sail search found no route after {} expanded", stats.expanded);
    SailOutcome::empty(stats)
}
