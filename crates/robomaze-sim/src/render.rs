//! The drawing collaborator.
//!
//! A [`Canvas`] knows how to put an arena and a robot on some output. The
//! simulation never talks to a canvas directly: it goes through a
//! [`RenderContext`], which remembers the styles of the last draw so that
//! `update_*` can repeat it after the grid or the robot changed.

use std::error::Error;
use std::thread;
use std::time::Duration;

use robomaze_core::{Color, Grid, Robot};

/// Result of a canvas operation.
pub type CanvasResult = Result<(), Box<dyn Error>>;

/// How the arena is laid out on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStyle {
    /// Margin around the arena, in canvas units.
    pub padding: u32,
    pub background: Color,
    /// Side of one cell, in canvas units.
    pub cell_size: u32,
}

/// Robot colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotStyle {
    pub border: Color,
    pub fill: Color,
}

/// A drawing surface for one arena and one robot.
///
/// The arena layer holds the static tiles. The robot layer holds the robot,
/// its home cell and the markers still on the grid, so it is the layer that
/// changes while the simulation runs.
pub trait Canvas {
    fn draw_arena(&mut self, grid: &Grid, style: &ArenaStyle) -> CanvasResult;

    fn draw_robot(
        &mut self,
        robot: &Robot,
        grid: &Grid,
        arena: &ArenaStyle,
        style: &RobotStyle,
    ) -> CanvasResult;

    fn clear_arena(&mut self) -> CanvasResult;

    fn clear_robot(&mut self) -> CanvasResult;

    /// Make pending drawing visible.
    fn present(&mut self) -> CanvasResult {
        Ok(())
    }
}

/// A canvas that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn draw_arena(&mut self, _: &Grid, _: &ArenaStyle) -> CanvasResult {
        Ok(())
    }

    fn draw_robot(&mut self, _: &Robot, _: &Grid, _: &ArenaStyle, _: &RobotStyle) -> CanvasResult {
        Ok(())
    }

    fn clear_arena(&mut self) -> CanvasResult {
        Ok(())
    }

    fn clear_robot(&mut self) -> CanvasResult {
        Ok(())
    }
}

/// Drawing state of one simulation run.
///
/// Canvas failures do not interrupt the simulation. The first one is kept
/// and can be retrieved with [`take_error`](Self::take_error); later ones are
/// only logged.
pub struct RenderContext<C: Canvas> {
    canvas: C,
    arena: Option<ArenaStyle>,
    robot: Option<RobotStyle>,
    delay: Option<Duration>,
    error: Option<Box<dyn Error>>,
}

impl<C: Canvas> RenderContext<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            arena: None,
            robot: None,
            delay: None,
            error: None,
        }
    }

    /// Pause for `delay` on every [`pace`](Self::pace).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay).filter(|d| !d.is_zero());
        self
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    pub fn is_arena_drawn(&self) -> bool {
        self.arena.is_some()
    }

    pub fn is_robot_drawn(&self) -> bool {
        self.robot.is_some()
    }

    /// Draw the arena and remember its style.
    pub fn draw_arena(&mut self, grid: &Grid, style: ArenaStyle) {
        if style.cell_size == 0 {
            return;
        }
        let r = self.canvas.draw_arena(grid, &style);
        self.record("draw arena", r);
        self.arena = Some(style);
        self.present();
    }

    /// Draw the robot on the current arena and remember its style.
    /// Does nothing while no arena is drawn.
    pub fn draw_robot(&mut self, robot: &Robot, grid: &Grid, style: RobotStyle) {
        let Some(arena) = self.arena else {
            return;
        };
        if !robot.is_valid(grid) {
            return;
        }
        let r = self.canvas.draw_robot(robot, grid, &arena, &style);
        self.record("draw robot", r);
        self.robot = Some(style);
        self.present();
    }

    /// Redraw the arena with the last style.
    pub fn update_arena(&mut self, grid: &Grid) {
        if let Some(style) = self.arena {
            self.draw_arena(grid, style);
        }
    }

    /// Redraw the robot with the last style.
    pub fn update_robot(&mut self, robot: &Robot, grid: &Grid) {
        if let Some(style) = self.robot {
            self.draw_robot(robot, grid, style);
        }
    }

    pub fn clear_arena(&mut self) {
        let r = self.canvas.clear_arena();
        self.record("clear arena", r);
        self.arena = None;
    }

    pub fn clear_robot(&mut self) {
        let r = self.canvas.clear_robot();
        self.record("clear robot", r);
        self.robot = None;
    }

    /// Wait for the configured step delay, if any.
    pub fn pace(&self) {
        if let Some(d) = self.delay {
            thread::sleep(d);
        }
    }

    /// The first canvas failure since the last call.
    pub fn take_error(&mut self) -> Option<Box<dyn Error>> {
        self.error.take()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    fn present(&mut self) {
        let r = self.canvas.present();
        self.record("present", r);
    }

    fn record(&mut self, op: &str, r: CanvasResult) {
        if let Err(e) = r {
            log::warn!("canvas {op} failed: {e}");
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}
