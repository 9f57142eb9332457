//! Plain 8-connected A*, used as ground truth for Jump Point Search.
//!
//! Every cell is a search node and every legal single step (per
//! [`Grid::reachable`]) is an edge, so this search is slower than JPS but
//! trivially complete. Its path cost is the reference JPS must match.

use std::collections::BinaryHeap;

use gridjump_core::{Grid, Point};

use crate::node::{NodeArena, NodeRef, NodeState};
use crate::traits::DistanceMetric;

/// A step-by-step path and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct AstarPath {
    /// Every cell from `from` to `to`, both included.
    pub steps: Vec<Point>,
    pub cost: f64,
}

/// Compute a shortest path from `from` to `to` with A*.
///
/// `cost` measures each single step and `heuristic` estimates the remaining
/// cost. Returns `None` if either endpoint is not walkable or no path exists.
pub fn astar_path(
    grid: &Grid,
    from: Point,
    to: Point,
    cost: &impl DistanceMetric,
    heuristic: &impl DistanceMetric,
) -> Option<AstarPath> {
    if !grid.is_walkable(from) || !grid.is_walkable(to) {
        return None;
    }
    let start_idx = grid.index(from)?;
    let goal_idx = grid.index(to)?;
    if start_idx == goal_idx {
        return Some(AstarPath {
            steps: vec![from],
            cost: 0.0,
        });
    }

    let mut arena = NodeArena::new(grid);
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq = 0u64;

    {
        let node = arena.get_or_create_idx(grid, start_idx);
        node.h = heuristic.distance(from, to);
        node.state = NodeState::Open;
        open.push(NodeRef {
            idx: start_idx,
            score: node.h,
            seq,
        });
    }

    let mut nbuf = Vec::with_capacity(8);

    let found = 'search: loop {
        let Some(current) = open.pop() else {
            break 'search false;
        };

        let ci = current.idx;
        let (current_point, current_g) = {
            let node = arena.get_or_create_idx(grid, ci);
            // Skip stale entries.
            if node.state != NodeState::Open {
                continue;
            }
            node.state = NodeState::Closed;
            (node.pos, node.g)
        };

        if ci == goal_idx {
            break 'search true;
        }

        nbuf.clear();
        grid.neighbors(current_point, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            let tentative_g = current_g + cost.distance(current_point, np);

            let n = arena.get_or_create_idx(grid, ni);
            match n.state {
                NodeState::Closed => continue,
                NodeState::Open if tentative_g >= n.g => continue,
                NodeState::Open => {}
                NodeState::New => n.h = heuristic.distance(np, to),
            }

            n.g = tentative_g;
            n.parent = Some(ci);
            n.state = NodeState::Open;

            seq += 1;
            open.push(NodeRef {
                idx: ni,
                score: n.g + n.h,
                seq,
            });
        }
    };

    if !found {
        return None;
    }

    // Reconstruct path.
    let mut steps = Vec::new();
    let mut ci = goal_idx;
    loop {
        let node = arena.get(ci)?;
        steps.push(node.pos);
        match node.parent {
            Some(p) => ci = p,
            None => break,
        }
    }
    steps.reverse();
    let total = arena.get(goal_idx)?.g;
    Some(AstarPath { steps, cost: total })
}
