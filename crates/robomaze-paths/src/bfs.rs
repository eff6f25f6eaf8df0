use std::collections::VecDeque;

use robomaze_core::{Grid, Point};

use crate::neighbors::traversable_neighbors;

/// Distance value of cells not reached by the last flood.
pub const UNREACHABLE: u32 = u32::MAX;

/// Breadth-first connectivity checks over the traversable cells of a grid.
///
/// The checker owns its distance map and queue and reuses them between
/// queries, so repeated checks on grids of the same size do not allocate.
#[derive(Debug, Default, Clone)]
pub struct Reachability {
    dist: Vec<u32>,
    queue: VecDeque<usize>,
    reached: usize,
}

impl Reachability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flood the traversable cells from `source` and record the BFS distance
    /// of every reached cell. The source itself is not checked.
    ///
    /// Returns the number of reached cells, or 0 if `source` lies outside
    /// the grid.
    pub fn flood(&mut self, grid: &Grid, source: Point) -> usize {
        self.dist.clear();
        self.dist.resize(grid.len(), UNREACHABLE);
        self.queue.clear();
        self.reached = 0;

        let Some(si) = grid.index(source) else {
            return 0;
        };
        self.dist[si] = 0;
        self.queue.push_back(si);
        self.reached = 1;

        while let Some(ci) = self.queue.pop_front() {
            let cd = self.dist[ci];
            let cp = grid.point(ci);
            for np in traversable_neighbors(grid, cp) {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if self.dist[ni] != UNREACHABLE {
                    continue;
                }
                self.dist[ni] = cd + 1;
                self.queue.push_back(ni);
                self.reached += 1;
            }
        }
        self.reached
    }

    /// Distance of `p` from the source of the last [`flood`](Self::flood),
    /// or [`UNREACHABLE`].
    pub fn dist_at(&self, grid: &Grid, p: Point) -> u32 {
        grid.index(p)
            .and_then(|i| self.dist.get(i).copied())
            .unwrap_or(UNREACHABLE)
    }

    /// Report whether every traversable cell of `grid` can reach every other
    /// one using orthogonal moves.
    ///
    /// A grid with at most one traversable cell is trivially connected.
    pub fn all_connected(&mut self, grid: &Grid) -> bool {
        let Some(first) = grid.first_traversable() else {
            return true;
        };
        let total = grid.count_fn(|_, t| t.is_traversable());
        self.flood(grid, first) == total
    }

    /// Every cell reachable from `from`, including `from` itself, in
    /// row-major order.
    pub fn reachable_from(&mut self, grid: &Grid, from: Point) -> Vec<Point> {
        self.flood(grid, from);
        self.dist
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != UNREACHABLE)
            .map(|(i, _)| grid.point(i))
            .collect()
    }

    /// Length of the shortest orthogonal route from `from` to `to`, if any.
    ///
    /// The target must be traversable unless it equals `from`.
    pub fn distance(&mut self, grid: &Grid, from: Point, to: Point) -> Option<u32> {
        grid.index(to)?;
        self.flood(grid, from);
        match self.dist_at(grid, to) {
            UNREACHABLE => None,
            d => Some(d),
        }
    }
}

/// Shorthand for [`Reachability::all_connected`] with a fresh checker.
pub fn all_connected(grid: &Grid) -> bool {
    Reachability::new().all_connected(grid)
}
