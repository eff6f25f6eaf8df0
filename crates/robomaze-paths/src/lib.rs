//! Search algorithms over a robomaze [`Grid`](robomaze_core::Grid).
//!
//! - [`PriorityQueue`]: binary min-heap with handles and decrease-key, backed
//!   by a [`Store`] with an explicit grow/shrink policy.
//! - [`astar`]: shortest 4-connected route between two cells, returned as a
//!   [`Path`] that [`path_to_directions`] turns into robot moves.
//! - [`Reachability`]: breadth-first connectivity checks, used to keep
//!   generated arenas in one piece.
//!
//! Only Empty and Marker cells are traversable; every move costs 1.

mod astar;
mod bfs;
mod heap;
mod neighbors;
mod node;
mod store;

pub use astar::astar;
pub use bfs::{Reachability, UNREACHABLE, all_connected};
pub use heap::{Handle, PriorityQueue};
pub use neighbors::{CARDINAL, traversable_neighbors};
pub use node::{NodeId, Path, PathNode, path_to_directions};
pub use store::Store;
