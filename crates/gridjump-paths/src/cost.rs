use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::node::Node;
use crate::traits::CostPolicy;

/// The built-in open-set orderings.
///
/// The choice changes optimality guarantees, not the search itself:
/// `AStar` is optimal with an admissible heuristic, `Dijkstra` ignores the
/// heuristic and degrades to uniform-cost search, `Greedy` ignores the cost
/// so far and may return a longer path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Cost {
    #[default]
    AStar,
    Dijkstra,
    Greedy,
}

impl Cost {
    pub const ALL: [Cost; 3] = [Cost::AStar, Cost::Dijkstra, Cost::Greedy];

    pub fn name(self) -> &'static str {
        match self {
            Cost::AStar => "astar",
            Cost::Dijkstra => "dijkstra",
            Cost::Greedy => "greedy",
        }
    }
}

impl CostPolicy for Cost {
    #[inline]
    fn score(&self, node: &Node) -> f64 {
        match self {
            Cost::AStar => node.g + node.h,
            Cost::Dijkstra => node.g,
            Cost::Greedy => node.h,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cost {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cost::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownStrategy {
                kind: "cost policy",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridjump_core::Point;

    #[test]
    fn scores_combine_g_and_h() {
        let mut n = Node::new(Point::new(1, 1), false);
        n.g = 3.0;
        n.h = 4.5;
        assert_eq!(Cost::AStar.score(&n), 7.5);
        assert_eq!(Cost::Dijkstra.score(&n), 3.0);
        assert_eq!(Cost::Greedy.score(&n), 4.5);
    }

    #[test]
    fn closures_are_policies() {
        let weighted = |n: &Node| n.g + 2.0 * n.h;
        let mut n = Node::new(Point::ZERO, false);
        n.g = 1.0;
        n.h = 1.0;
        assert_eq!(weighted.score(&n), 3.0);
    }

    #[test]
    fn parse_names() {
        assert_eq!("AStar".parse::<Cost>().unwrap(), Cost::AStar);
        assert_eq!("greedy".parse::<Cost>().unwrap(), Cost::Greedy);
        assert!("bfs".parse::<Cost>().is_err());
    }
}
