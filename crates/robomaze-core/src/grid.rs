//! The arena: a fixed-size, dense 2D grid of [`Tile`]s.
//!
//! Reads outside the grid return `None` and writes outside the grid are
//! ignored, so callers can probe neighbours without bounds checks of their
//! own.

use std::fmt;

use crate::geom::{Bounds, Point};

/// Content of a single arena cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Free floor.
    #[default]
    Empty,
    /// Impassable block.
    Obstacle,
    /// Free floor holding a collectible marker.
    Marker,
    /// A removed cell. Impassable and never drawn.
    Void,
}

impl Tile {
    /// Whether a robot may stand on this tile.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Tile::Empty | Tile::Marker)
    }

    /// Single-character representation used by [`Grid`]'s `Display`.
    pub const fn symbol(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Obstacle => '#',
            Tile::Marker => 'm',
            Tile::Void => ' ',
        }
    }
}

/// A dense 2D grid of [`Tile`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Tile>,
    bounds: Bounds,
}

impl Grid {
    /// Create a grid filled with [`Tile::Empty`].
    ///
    /// Returns `None` unless both dimensions are at least 1, or if the tiles
    /// cannot be allocated.
    pub fn new(width: i32, height: i32) -> Option<Self> {
        if width < 1 || height < 1 {
            return None;
        }
        let len = (width as usize).checked_mul(height as usize)?;
        let mut tiles = Vec::new();
        tiles.try_reserve_exact(len).ok()?;
        tiles.resize(len, Tile::Empty);
        Some(Self {
            tiles,
            bounds: Bounds::new(width, height),
        })
    }

    /// The cells `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Set the tile at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    pub fn set_empty(&mut self, p: Point) {
        self.set(p, Tile::Empty);
    }

    pub fn set_obstacle(&mut self, p: Point) {
        self.set(p, Tile::Obstacle);
    }

    pub fn set_marker(&mut self, p: Point) {
        self.set(p, Tile::Marker);
    }

    /// Remove the cell from the arena.
    pub fn set_void(&mut self, p: Point) {
        self.set(p, Tile::Void);
    }

    /// Whether `p` is in range and holds an Empty or Marker tile.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_traversable)
    }

    /// First traversable cell in row-major order.
    pub fn first_traversable(&self) -> Option<Point> {
        self.tiles
            .iter()
            .position(|t| t.is_traversable())
            .map(|i| self.point(i))
    }

    /// Count how many cells hold the given tile.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, Tile) -> bool) -> usize {
        self.iter().filter(|&(p, t)| f(p, t)).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}

impl fmt::Display for Grid {
    /// One text row per grid row, using [`Tile::symbol`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, t) in self.iter() {
            if p.x == 0 && p.y > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", t.symbol())?;
        }
        Ok(())
    }
}
