//! Navigation on top of the tidepath searches.
//!
//! [`Navigator`] holds the snapshot a search reads (collision map,
//! transports, config) and hands out walk and sail results; the
//! [`StepFollower`] turns those into one movement command per tick through
//! the [`Mover`] and [`RoutePlanner`] collaborators.

pub mod follower;
pub mod navigator;

pub use follower::{FollowState, Mover, RoutePlanner, StepFollower};
pub use navigator::{HullSnapshot, Navigator, VesselQuery};
