//! The marker-collecting [`Robot`].
//!
//! A robot's whole state is its position, heading and carried-marker count.
//! It does not own the arena it moves on: every operation takes the
//! [`Grid`] explicitly. Commands issued to a robot that is not in a valid
//! state (standing outside the grid or on a void cell) are ignored.

use crate::geom::{Direction, Point};
use crate::grid::{Grid, Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    position: Point,
    direction: Direction,
    home: Point,
    carried: u32,
}

impl Robot {
    /// Create a robot standing on its home cell.
    ///
    /// Returns `None` unless `home` is an [`Tile::Empty`] cell of `grid`.
    pub fn new(grid: &Grid, home: Point, direction: Direction) -> Option<Self> {
        if grid.at(home) != Some(Tile::Empty) {
            return None;
        }
        Some(Self {
            position: home,
            direction,
            home,
            carried: 0,
        })
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn home(&self) -> Point {
        self.home
    }

    /// Number of markers picked up and not yet dropped.
    #[inline]
    pub fn carried_markers(&self) -> u32 {
        self.carried
    }

    #[inline]
    pub fn is_home(&self) -> bool {
        self.position == self.home
    }

    /// Place the robot on another cell without moving through the arena.
    ///
    /// Used once while building a maze to put the robot on its start cell.
    pub fn relocate(&mut self, p: Point) {
        self.position = p;
    }

    /// Whether the robot stands on an existing, non-void cell of `grid`.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        grid.at(self.position).is_some_and(|t| t != Tile::Void)
    }

    pub fn turn_left(&mut self, grid: &Grid) {
        if self.is_valid(grid) {
            self.direction = self.direction.turned_left();
        }
    }

    pub fn turn_right(&mut self, grid: &Grid) {
        if self.is_valid(grid) {
            self.direction = self.direction.turned_right();
        }
    }

    /// The cell directly in front of the robot.
    #[inline]
    pub fn ahead(&self) -> Point {
        self.position + self.direction.offset()
    }

    /// Whether the cell ahead is inside the grid and Empty or Marker.
    pub fn can_move_forward(&self, grid: &Grid) -> bool {
        self.is_valid(grid) && grid.is_traversable(self.ahead())
    }

    /// Step one cell forward. Returns whether the robot moved.
    pub fn move_forward(&mut self, grid: &Grid) -> bool {
        if !self.can_move_forward(grid) {
            return false;
        }
        self.position = self.ahead();
        true
    }

    pub fn is_at_marker(&self, grid: &Grid) -> bool {
        self.is_valid(grid) && grid.at(self.position) == Some(Tile::Marker)
    }

    /// Pick up the marker under the robot, leaving the cell empty.
    /// Returns whether a marker was picked up.
    pub fn pick_up_marker(&mut self, grid: &mut Grid) -> bool {
        if !self.is_at_marker(grid) {
            return false;
        }
        self.carried += 1;
        grid.set_empty(self.position);
        true
    }

    /// Drop a carried marker onto the empty cell under the robot.
    ///
    /// On the home cell every carried marker is banked: the count resets to
    /// zero and the tile is left untouched. Elsewhere one marker is put back
    /// on the grid. Returns the number of markers that left the robot.
    pub fn drop_marker(&mut self, grid: &mut Grid) -> u32 {
        if !self.is_valid(grid)
            || self.carried == 0
            || grid.at(self.position) != Some(Tile::Empty)
        {
            return 0;
        }
        if self.is_home() {
            return std::mem::take(&mut self.carried);
        }
        self.carried -= 1;
        grid.set_marker(self.position);
        1
    }
}
