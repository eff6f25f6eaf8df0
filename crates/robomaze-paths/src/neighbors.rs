use robomaze_core::{Grid, Point};

/// The four orthogonal steps in expansion order: down, right, up, left.
pub const CARDINAL: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

/// Orthogonal neighbours of `p` that lie inside `grid` and are traversable,
/// in [`CARDINAL`] order.
pub fn traversable_neighbors(grid: &Grid, p: Point) -> impl Iterator<Item = Point> + '_ {
    CARDINAL
        .into_iter()
        .map(move |d| p + d)
        .filter(|&n| grid.is_traversable(n))
}
