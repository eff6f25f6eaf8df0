//! The robomaze simulation.
//!
//! A [`Maze`] is built from [`MazeSettings`], either read from the text
//! format (see [`settings`]) or drawn by [`generate_random`]. Solving it
//! drives the robot to every marker and back home while a [`Canvas`],
//! reached through a [`RenderContext`], shows each step.

pub mod generate;
pub mod maze;
pub mod render;
pub mod settings;

pub use generate::{GenerateError, GenerateParams, OBSTACLE_RETRIES, generate_random};
pub use maze::{Maze, SolveReport, SolveStop};
pub use render::{ArenaStyle, Canvas, CanvasResult, NullCanvas, RenderContext, RobotStyle};
pub use settings::{ItemKind, LoadError, MazeSettings, ParseError, SettingsError};
