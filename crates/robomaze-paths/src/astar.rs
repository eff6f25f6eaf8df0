use robomaze_core::{Grid, Point};

use crate::heap::PriorityQueue;
use crate::neighbors::traversable_neighbors;
use crate::node::{NodeArena, NodeId, Path, PathNode};

/// Initial capacity of the open set.
const OPEN_SET_CAPACITY: usize = 64;

/// Compute a shortest 4-connected path from `start` to `goal` using A*.
///
/// Moves cost 1 and only Empty and Marker cells can be entered; the start
/// cell itself is not checked. The Manhattan distance is used as heuristic.
///
/// Returns `None` if either endpoint lies outside the grid or the goal cannot
/// be reached.
pub fn astar(grid: &Grid, start: Point, goal: Point) -> Option<Path> {
    let start_idx = grid.index(start)?;
    grid.index(goal)?;

    let mut arena = NodeArena::with_capacity(OPEN_SET_CAPACITY);
    let mut best: Vec<Option<NodeId>> = vec![None; grid.len()];
    let mut closed = vec![false; grid.len()];
    let mut open: PriorityQueue<NodeId> = PriorityQueue::with_capacity(OPEN_SET_CAPACITY)?;

    let node = PathNode::new(start, 0, start.manhattan(goal), None);
    let f = node.f;
    let start_id = arena.alloc(node);
    arena[start_id].handle = Some(open.insert(f, start_id));
    best[start_idx] = Some(start_id);

    let mut expanded = 0usize;
    let found = loop {
        let Some((_, current)) = open.extract_min() else {
            break None;
        };
        arena[current].handle = None;
        let cp = arena[current].pos;
        let cg = arena[current].g;
        if let Some(ci) = grid.index(cp) {
            closed[ci] = true;
        }
        log::trace!("astar expand {cp} g={cg}");

        if cp == goal {
            break Some(current);
        }
        expanded += 1;

        for np in traversable_neighbors(grid, cp) {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if closed[ni] {
                continue;
            }
            let g = cg + 1;
            let h = np.manhattan(goal);

            match best[ni] {
                None => {
                    let id = arena.alloc(PathNode::new(np, g, h, Some(current)));
                    let handle = open.insert(g + h, id);
                    arena[id].handle = Some(handle);
                    best[ni] = Some(id);
                }
                Some(id) => {
                    let node = &mut arena[id];
                    if g >= node.g {
                        continue;
                    }
                    node.g = g;
                    node.h = h;
                    node.f = g + h;
                    node.parent = Some(current);
                    if let Some(handle) = node.handle {
                        open.decrease_key(handle, node.f);
                    }
                }
            }
        }
    };

    let path = found.map(|goal_id| Path::from_chain(&arena, goal_id));
    log::debug!(
        "astar {start} -> {goal}: expanded {expanded} of {} nodes, {}",
        arena.len(),
        match &path {
            Some(p) => format!("{} steps", p.steps()),
            None => "unreachable".to_string(),
        }
    );
    path
}
