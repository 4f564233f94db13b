//! Tunable search parameters.
//!
//! Every constant the pathfinders use lives in [`SearchConfig`]. With the
//! `serde` feature the config (de)serializes with every field optional, so a
//! JSON file only needs the values it overrides.

/// Parameters for both pathfinders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Cost of an orthogonal grid step.
    pub orthogonal_cost: i32,
    /// Cost of a diagonal grid step.
    pub diagonal_cost: i32,
    /// Heuristic penalty per level of difference between a vertex and the
    /// target. Levels are only joined by transports.
    pub level_penalty: i32,
    /// Expanded-node budget for the walker.
    pub max_expanded: usize,
    pub transport: TransportCosts,
    pub hull: HullLimits,
    /// Ring radius scanned by the proximity field.
    pub proximity_radius: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            orthogonal_cost: 10,
            diagonal_cost: 14,
            level_penalty: 500,
            max_expanded: 250_000,
            transport: TransportCosts::default(),
            hull: HullLimits::default(),
            proximity_radius: 8,
        }
    }
}

impl SearchConfig {
    /// Step cost for one grid move.
    #[inline]
    pub fn step_cost(&self, diagonal: bool) -> i32 {
        if diagonal {
            self.diagonal_cost
        } else {
            self.orthogonal_cost
        }
    }
}

/// Shape of the transport edge cost.
///
/// For a transport of `duration` taken as the `chain`-th transport on the
/// current path (1 for the first), with `frontier` pending vertices:
///
/// ```text
/// base + duration * duration_weight * chain
///      + duration² * duration_growth
///      + chain² * chain_penalty
///      + (frontier / frontier_divisor)²
/// ```
///
/// Every term past `base` grows faster than linearly in its input, so long
/// transports, long chains and wide searches all get dearer per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TransportCosts {
    pub base: i32,
    pub duration_weight: i32,
    pub duration_growth: i32,
    pub chain_penalty: i32,
    pub frontier_divisor: i32,
}

impl Default for TransportCosts {
    fn default() -> Self {
        Self {
            base: 10,
            duration_weight: 10,
            duration_growth: 1,
            chain_penalty: 50,
            frontier_divisor: 2_000,
        }
    }
}

impl TransportCosts {
    /// Edge cost for taking a transport. Never negative; saturates instead
    /// of overflowing.
    pub fn cost(&self, duration: i32, chain: i32, frontier: usize) -> i32 {
        let duration = duration.max(0);
        let chain = chain.max(1);
        let scaled = i32::try_from(frontier / self.frontier_divisor.max(1) as usize)
            .unwrap_or(i32::MAX);
        self.base
            .max(0)
            .saturating_add(
                duration
                    .saturating_mul(self.duration_weight.max(0))
                    .saturating_mul(chain),
            )
            .saturating_add(
                duration
                    .saturating_mul(duration)
                    .saturating_mul(self.duration_growth.max(0)),
            )
            .saturating_add(chain.saturating_mul(chain).saturating_mul(self.chain_penalty.max(0)))
            .saturating_add(scaled.saturating_mul(scaled))
    }
}

/// Budgets for the hull search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HullLimits {
    /// Maximum heap pops.
    pub max_iterations: usize,
    /// Maximum pending heap entries.
    pub max_heap: usize,
}

impl Default for HullLimits {
    fn default() -> Self {
        Self {
            max_iterations: 200_000,
            max_heap: 1_000_000,
        }
    }
}

/// Cost multipliers by distance to the nearest obstacle.
///
/// `multipliers[0]` applies at distance 1, `multipliers[1]` at distance 2,
/// and so on; distances past the end of the list cost 1×.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityTiers {
    pub multipliers: Vec<i32>,
}

impl Default for ProximityTiers {
    fn default() -> Self {
        Self {
            multipliers: vec![100, 30, 12, 5, 2],
        }
    }
}

impl ProximityTiers {
    /// Multiplier for a tile `distance` tiles from the nearest obstacle.
    #[inline]
    pub fn multiplier(&self, distance: i32) -> i32 {
        if distance < 1 {
            return self.multipliers.first().copied().unwrap_or(1).max(1);
        }
        self.multipliers
            .get((distance - 1) as usize)
            .copied()
            .unwrap_or(1)
            .max(1)
    }
}
