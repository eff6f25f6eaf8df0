//! **robomaze-core**: core types of the marker-collecting robot simulator.
//!
//! This crate provides the foundational types shared by the rest of the
//! workspace: geometry primitives, the tile [`Grid`] the robot moves on, the
//! [`Robot`] state machine itself and drawing colours.

pub mod geom;
pub mod grid;
pub mod robot;
pub mod style;

pub use geom::{Bounds, Cells, Direction, Point};
pub use grid::{Grid, Tile};
pub use robot::Robot;
pub use style::Color;
