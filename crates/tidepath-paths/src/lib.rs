//! Pathfinding for walkers and vessels on a leveled tile grid.
//!
//! Two searches share the same building blocks:
//!
//! - **Walking** ([`Walker`]): A\* over 8-connected tiles plus
//!   [`Transport`] edges (teleports, ladders, ferries), with blacklists, area
//!   targets and a per-level heuristic penalty.
//! - **Sailing** ([`sail_path`]): Dijkstra over the anchor of a multi-tile
//!   [`HullProfile`], rotating the hull to the direction of travel and
//!   optionally weighting steps by distance to the nearest rock
//!   ([`CostShaping`]).
//!
//! Both read a [`CollisionMap`](tidepath_core::CollisionMap) and a
//! [`TransportGraph`] snapshot and allocate their own [`SearchLedger`] and
//! [`Frontier`], so independent searches can run in parallel over one map.
//! Neither returns an error for "no route": an empty result carries
//! [`SearchStats`] instead.
//!
//! # Building blocks
//!
//! | Type | Role |
//! |---|---|
//! | [`Frontier`] | min-priority open set, FIFO on ties |
//! | [`SearchLedger`] | best cost, parent and closed flag per vertex |
//! | [`TransportGraph`] | origin-indexed transports |
//! | [`HullProfile`] | footprint rotated into 8 directions |
//! | [`ProximityField`] | memoized obstacle distances |
//! | [`SearchConfig`] | every tunable cost and budget |

mod astar;
mod bfs;
mod config;
mod dijkstra;
mod distance;
mod frontier;
mod hull;
mod ledger;
mod proximity;
mod simplify;
mod transport;

pub use astar::{Hop, RequestError, Route, Target, WalkRequest, Walker};
pub use bfs::reachable_within;
pub use config::{HullLimits, ProximityTiers, SearchConfig, TransportCosts};
pub use dijkstra::{CostShaping, SailOutcome, sail_path};
pub use distance::{chebyshev, manhattan, octile};
pub use frontier::Frontier;
pub use hull::HullProfile;
pub use ledger::{BLACKLISTED, LedgerEntry, SearchLedger, SearchStats};
pub use proximity::ProximityField;
pub use simplify::{Waypoint, segment_heading, simplify, simplify_route};
pub use transport::{Transport, TransportGraph, TransportId, TransportSource};
