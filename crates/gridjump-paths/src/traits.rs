use gridjump_core::Point;

use crate::node::Node;

/// Orders the open set: the node with the lowest score is expanded first.
pub trait CostPolicy {
    /// Combine a node's cost-so-far (`node.g`) and heuristic estimate
    /// (`node.h`) into a single priority.
    fn score(&self, node: &Node) -> f64;
}

/// Straight-line cost between two grid coordinates.
///
/// Used both as the true edge cost between jump points and, separately, as
/// the heuristic estimate towards the goal. Implementations must be
/// symmetric, non-negative and zero only when `a == b`.
pub trait DistanceMetric {
    fn distance(&self, a: Point, b: Point) -> f64;

    /// Whether this metric can overestimate the true cost of an 8-directional
    /// path. Such a metric makes an A*-ordered search non-optimal when used
    /// as the heuristic; choosing it is the caller's call.
    fn overestimates_diagonals(&self) -> bool {
        false
    }
}

impl<F> CostPolicy for F
where
    F: Fn(&Node) -> f64,
{
    fn score(&self, node: &Node) -> f64 {
        self(node)
    }
}

impl<F> DistanceMetric for F
where
    F: Fn(Point, Point) -> f64,
{
    fn distance(&self, a: Point, b: Point) -> f64 {
        self(a, b)
    }
}
