use std::ops::{Index, IndexMut};

use robomaze_core::{Direction, Point};

use crate::heap::Handle;

/// Index of a [`PathNode`] inside the arena that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One cell visited by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    pub pos: Point,
    /// Cost from the start.
    pub g: u32,
    /// Heuristic estimate to the goal.
    pub h: u32,
    /// `g + h`.
    pub f: u32,
    /// Predecessor on the best known path.
    pub parent: Option<NodeId>,
    /// Handle into the open set while the node is queued.
    pub handle: Option<Handle>,
}

impl PathNode {
    pub fn new(pos: Point, g: u32, h: u32, parent: Option<NodeId>) -> Self {
        Self {
            pos,
            g,
            h,
            f: g + h,
            parent,
            handle: None,
        }
    }
}

/// Per-search node storage. Dropping the arena releases every node at once.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<PathNode>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn alloc(&mut self, node: PathNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = PathNode;

    fn index(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut PathNode {
        &mut self.nodes[id.0]
    }
}

/// A route returned by a search: the goal node and its chain of parents back
/// to the start.
///
/// A `Path` owns exactly the nodes of that chain. Walking it with
/// [`nodes`](Path::nodes) follows the parent links from goal to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// `nodes[0]` is the goal; every node's parent is the next element.
    nodes: Vec<PathNode>,
}

impl Path {
    /// Copy the chain ending at `goal` out of a search arena.
    pub(crate) fn from_chain(arena: &NodeArena, goal: NodeId) -> Self {
        let mut nodes = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let node = &arena[id];
            cur = node.parent;
            let parent = cur.map(|_| NodeId(nodes.len() + 1));
            nodes.push(PathNode {
                parent,
                handle: None,
                ..node.clone()
            });
        }
        Self { nodes }
    }

    /// Build a unit-cost path through the given cells, start first.
    ///
    /// Returns `None` for an empty slice or if two consecutive cells are not
    /// orthogonal neighbours.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let goal = *points.last()?;
        if points
            .windows(2)
            .any(|w| Direction::from_offset(w[1] - w[0]).is_none())
        {
            return None;
        }
        let last = points.len() - 1;
        let nodes = points
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &p)| {
                let parent = (i > 0).then(|| NodeId(last - i + 1));
                PathNode::new(p, i as u32, p.manhattan(goal), parent)
            })
            .collect();
        Some(Self { nodes })
    }

    pub fn goal(&self) -> &PathNode {
        &self.nodes[0]
    }

    pub fn start(&self) -> &PathNode {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Predecessor of `node` on this path.
    pub fn parent(&self, node: &PathNode) -> Option<&PathNode> {
        node.parent.and_then(|id| self.nodes.get(id.0))
    }

    /// Iterate from the goal back to the start along the parent links.
    pub fn nodes(&self) -> impl Iterator<Item = &PathNode> + '_ {
        std::iter::successors(Some(self.goal()), |n| self.parent(n))
    }

    /// Number of moves, i.e. one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Accumulated cost of the goal node.
    pub fn cost(&self) -> u32 {
        self.goal().g
    }

    /// The cells of the path, start first.
    pub fn points(&self) -> Vec<Point> {
        let mut pts: Vec<Point> = self.nodes().map(|n| n.pos).collect();
        pts.reverse();
        pts
    }

    /// Shorthand for [`path_to_directions`].
    pub fn directions(&self) -> Vec<Direction> {
        path_to_directions(self)
    }
}

/// Convert a path into the sequence of moves that walks it, start first.
///
/// A path without moves yields an empty sequence.
pub fn path_to_directions(path: &Path) -> Vec<Direction> {
    let mut dirs: Vec<Direction> = path
        .nodes()
        .zip(path.nodes().skip(1))
        .filter_map(|(node, parent)| Direction::from_offset(node.pos - parent.pos))
        .collect();
    dirs.reverse();
    dirs
}
