use std::cmp::Ordering;

use gridjump_core::{Grid, Point};

/// Where a node stands in the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    /// Not yet seen by the current search.
    #[default]
    New,
    /// In the open set.
    Open,
    /// Expanded; in the closed set.
    Closed,
}

/// A grid coordinate enriched with the transient state of one search.
///
/// `parent` is the arena index of the node this one was reached from; it is
/// a back-pointer used to rebuild the path, not an ownership link.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Point,
    /// Cost of the best known path from the start.
    pub g: f64,
    /// Heuristic estimate from this node to the goal.
    pub h: f64,
    pub parent: Option<usize>,
    /// Fixed when the node is created from the grid.
    pub obstacle: bool,
    pub state: NodeState,
    pub(crate) generation: u32,
}

impl Node {
    pub fn new(pos: Point, obstacle: bool) -> Self {
        Self {
            pos,
            g: 0.0,
            h: 0.0,
            parent: None,
            obstacle,
            state: NodeState::New,
            generation: 0,
        }
    }

    /// Clear everything a previous search left behind.
    pub fn reset(&mut self) {
        self.g = 0.0;
        self.h = 0.0;
        self.parent = None;
        self.state = NodeState::New;
    }
}

// ---------------------------------------------------------------------------
// Open-set entries
// ---------------------------------------------------------------------------

/// Reference into the node arena, ordered by score for use in `BinaryHeap`.
///
/// Equal scores pop in insertion order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) score: f64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest score first.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// NodeArena
// ---------------------------------------------------------------------------

/// Side table of [`Node`]s, one slot per grid cell, populated lazily.
///
/// The arena is kept apart from the [`Grid`] so that independent searches
/// over the same grid each own their transient state. Starting a new search
/// bumps a generation counter; a node stamped with an older generation is
/// reset the first time the new search touches it.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Option<Node>>,
    generation: u32,
}

impl NodeArena {
    /// Create an empty arena sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            nodes: vec![None; grid.len()],
            generation: 1,
        }
    }

    /// Invalidate every node lazily before an independent search.
    pub fn begin_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped around: stale stamps could collide, so reset eagerly.
            for node in self.nodes.iter_mut().flatten() {
                node.reset();
                node.generation = 0;
            }
            self.generation = 1;
        }
    }

    /// The node at `p`, created on first access.
    ///
    /// Returns `None` if `p` is outside the grid. A node last touched by an
    /// earlier search is reset before being handed out.
    pub fn get_or_create(&mut self, grid: &Grid, p: Point) -> Option<&mut Node> {
        let idx = grid.index(p)?;
        Some(self.get_or_create_idx(grid, idx))
    }

    pub(crate) fn get_or_create_idx(&mut self, grid: &Grid, idx: usize) -> &mut Node {
        let generation = self.generation;
        let node = self.nodes[idx].get_or_insert_with(|| {
            let pos = grid.point(idx);
            Node::new(pos, grid.is_obstacle(pos))
        });
        if node.generation != generation {
            node.reset();
            node.generation = generation;
        }
        node
    }

    /// The node at `idx` if it has been touched by the current search.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Node> {
        self.nodes
            .get(idx)?
            .as_ref()
            .filter(|n| n.generation == self.generation)
    }

    /// Number of nodes created so far, across all searches.
    pub fn allocated(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Number of nodes touched by the current search.
    pub fn touched(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .filter(|n| n.generation == self.generation)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn reset_clears_transient_fields_only() {
        let mut n = Node::new(Point::new(2, 3), true);
        n.g = 4.0;
        n.h = 1.5;
        n.parent = Some(7);
        n.state = NodeState::Closed;
        n.reset();
        assert_eq!(n.g, 0.0);
        assert_eq!(n.h, 0.0);
        assert_eq!(n.parent, None);
        assert_eq!(n.state, NodeState::New);
        assert!(n.obstacle);
        assert_eq!(n.pos, Point::new(2, 3));
    }

    #[test]
    fn nodes_are_created_lazily_and_cached() {
        let mut grid = Grid::new(Point::ZERO, 4, 4);
        grid.set_obstacle(Point::new(1, 1));
        let mut arena = NodeArena::new(&grid);
        assert_eq!(arena.allocated(), 0);

        let n = arena.get_or_create(&grid, Point::new(1, 1)).unwrap();
        assert!(n.obstacle);
        n.g = 9.0;
        assert_eq!(arena.allocated(), 1);

        let again = arena.get_or_create(&grid, Point::new(1, 1)).unwrap();
        assert_eq!(again.g, 9.0);
        assert_eq!(arena.allocated(), 1);
        assert!(arena.get_or_create(&grid, Point::new(4, 0)).is_none());
    }

    #[test]
    fn new_search_resets_touched_nodes() {
        let grid = Grid::new(Point::ZERO, 3, 3);
        let mut arena = NodeArena::new(&grid);
        let p = Point::new(2, 2);
        let idx = grid.index(p).unwrap();
        {
            let n = arena.get_or_create(&grid, p).unwrap();
            n.g = 5.0;
            n.parent = Some(0);
            n.state = NodeState::Open;
        }
        assert_eq!(arena.touched(), 1);

        arena.begin_search();
        assert_eq!(arena.touched(), 0);
        assert!(arena.get(idx).is_none());

        let n = arena.get_or_create(&grid, p).unwrap();
        assert_eq!(n.g, 0.0);
        assert_eq!(n.parent, None);
        assert_eq!(n.state, NodeState::New);
        assert_eq!(arena.touched(), 1);
    }

    #[test]
    fn heap_pops_lowest_score_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, score: 3.0, seq: 0 });
        heap.push(NodeRef { idx: 1, score: 1.0, seq: 1 });
        heap.push(NodeRef { idx: 2, score: 1.0, seq: 2 });
        heap.push(NodeRef { idx: 3, score: 2.0, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|r| r.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }
}
