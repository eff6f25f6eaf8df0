//! Geometry primitives: [`Point`], the arena [`Bounds`] and the four-way
//! [`Direction`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down (screen coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub const fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four headings a robot can face.
///
/// The discriminants are part of the settings file format
/// (`0` = up, `1` = right, `2` = down, `3` = left).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Decode a direction from its file-format index.
    #[inline]
    pub const fn from_index(i: u8) -> Option<Direction> {
        match i {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// File-format index of the direction.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The direction after a quarter turn clockwise.
    #[inline]
    pub const fn turned_right(self) -> Direction {
        Self::ALL[(self as usize + 1) % 4]
    }

    /// The direction after a quarter turn counter-clockwise.
    #[inline]
    pub const fn turned_left(self) -> Direction {
        Self::ALL[(self as usize + 3) % 4]
    }

    /// Unit step taken when moving one cell in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    /// Inverse of [`offset`](Self::offset). Anything other than a unit
    /// orthogonal step yields `None`.
    #[inline]
    pub const fn from_offset(d: Point) -> Option<Direction> {
        match (d.x, d.y) {
            (0, -1) => Some(Direction::Up),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }

    /// Signed number of quarter turns needed to face `target`.
    ///
    /// Positive values are clockwise (right) turns, negative values
    /// counter-clockwise. The result is always in `-1..=2`, so a half turn
    /// is expressed as two right turns.
    #[inline]
    pub const fn turns_to(self, target: Direction) -> i32 {
        let d = (target as i32 - self as i32 + 4) % 4;
        if d > 2 { d - 4 } else { d }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The cells `[0, width) x [0, height)` of an arena.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    /// Negative sides are treated as zero.
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    #[inline]
    pub const fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> i32 {
        self.height
    }

    #[inline]
    pub const fn contains(self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Row-major walk over every cell.
    pub fn iter(self) -> Cells {
        Cells {
            bounds: self,
            next: Point::ZERO,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Point;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.iter()
    }
}

/// Iterator returned by [`Bounds::iter`].
#[derive(Clone, Debug)]
pub struct Cells {
    bounds: Bounds,
    next: Point,
}

impl Iterator for Cells {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if !self.bounds.contains(self.next) {
            return None;
        }
        let p = self.next;
        self.next.x += 1;
        if self.next.x == self.bounds.width {
            self.next = Point::new(0, p.y + 1);
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a + Direction::Up.offset(), Point::new(1, 1));
    }

    #[test]
    fn point_manhattan() {
        assert_eq!(Point::new(0, 0).manhattan(Point::new(2, 2)), 4);
        assert_eq!(Point::new(3, -1).manhattan(Point::new(-2, 4)), 10);
        assert_eq!(Point::new(5, 5).manhattan(Point::new(5, 5)), 0);
    }

    #[test]
    fn direction_turns_wrap_around() {
        assert_eq!(Direction::Up.turned_left(), Direction::Left);
        assert_eq!(Direction::Left.turned_right(), Direction::Up);
        let mut d = Direction::Down;
        for _ in 0..4 {
            d = d.turned_right();
        }
        assert_eq!(d, Direction::Down);
    }

    #[test]
    fn direction_offsets_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_offset(d.offset()), Some(d));
        }
        assert_eq!(Direction::from_offset(Point::new(1, 1)), None);
        assert_eq!(Direction::from_offset(Point::ZERO), None);
    }

    #[test]
    fn direction_index_matches_file_format() {
        assert_eq!(Direction::from_index(0), Some(Direction::Up));
        assert_eq!(Direction::from_index(2), Some(Direction::Down));
        assert_eq!(Direction::from_index(4), None);
        assert_eq!(Direction::Left.index(), 3);
    }

    #[test]
    fn half_turn_needs_two_turns() {
        let n = Direction::Up.turns_to(Direction::Down);
        assert_eq!(n.abs(), 2);
        assert_eq!(Direction::Right.turns_to(Direction::Left).abs(), 2);
    }

    #[test]
    fn quarter_turns_pick_the_short_way() {
        assert_eq!(Direction::Up.turns_to(Direction::Right), 1);
        assert_eq!(Direction::Up.turns_to(Direction::Left), -1);
        assert_eq!(Direction::Left.turns_to(Direction::Up), 1);
        assert_eq!(Direction::Down.turns_to(Direction::Down), 0);
    }

    #[test]
    fn bounds_contain_only_arena_cells() {
        let b = Bounds::new(3, 2);
        assert!(b.contains(Point::new(0, 0)));
        assert!(b.contains(Point::new(2, 1)));
        assert!(!b.contains(Point::new(3, 0)));
        assert!(!b.contains(Point::new(0, 2)));
        assert!(!b.contains(Point::new(-1, 0)));
    }

    #[test]
    fn cells_are_row_major() {
        let pts: Vec<_> = Bounds::new(3, 2).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[1], Point::new(1, 0));
        assert_eq!(pts[3], Point::new(0, 1));
        assert_eq!(pts[5], Point::new(2, 1));
    }

    #[test]
    fn degenerate_bounds_have_no_cells() {
        assert_eq!(Bounds::new(0, 5).iter().count(), 0);
        assert_eq!(Bounds::new(4, -1).iter().count(), 0);
        assert_eq!(Bounds::new(-2, 3), Bounds::new(0, 3));
    }
}
