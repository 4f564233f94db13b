//! **tidepath-core**: world geometry and terrain data for tidepath.
//!
//! This crate provides the foundational types every search builds on:
//! 2D geometry, level-aware positions and their packed vertex keys, compass
//! directions and headings, directional collision data, and an ASCII chart
//! loader for building terrain from text.

pub mod chart;
pub mod collision;
pub mod coord;
pub mod direction;
pub mod geom;

pub use chart::{Chart, ChartError};
pub use collision::{CollisionFlags, CollisionGrid, CollisionMap};
pub use coord::{CoordError, NO_PARENT, PosKey};
pub use direction::{Direction, Heading};
pub use geom::{Point, Position, Range};
