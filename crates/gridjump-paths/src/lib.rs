//! Jump Point Search on uniform-cost 8-connected grids.
//!
//! The engine, [`JumpPointSearch`], resolves one start/goal pair at a time
//! over a borrowed [`Grid`](gridjump_core::Grid). Straight steps cost 1 and
//! diagonal steps cost √2; a diagonal step may pass a single blocked corner
//! but never squeeze between two.
//!
//! Two strategies are pluggable:
//!
//! | Trait | Built-in | Role |
//! |---|---|---|
//! | [`CostPolicy`] | [`Cost`] | orders the open set (A*, Dijkstra, greedy) |
//! | [`DistanceMetric`] | [`Metric`] | edge cost between jump points, and the heuristic |
//!
//! ```
//! use gridjump_core::{Grid, Point};
//! use gridjump_paths::{Cost, JumpPointSearch, Metric};
//!
//! let grid = Grid::new(Point::ZERO, 5, 5);
//! let mut jps = JumpPointSearch::configure(
//!     &grid,
//!     Point::new(0, 0),
//!     Point::new(4, 4),
//!     Cost::AStar,
//!     Metric::Octile,
//!     Metric::Octile,
//! )
//! .unwrap();
//! assert_eq!(jps.run(), vec![Point::new(4, 4)]);
//! ```

mod astar;
mod config;
mod cost;
mod distance;
mod error;
mod jps;
mod node;
mod path;
mod traits;

pub use astar::{AstarPath, astar_path};
pub use config::{SearchBuilder, SearchConfig};
pub use cost::Cost;
pub use distance::{Metric, chebyshev, euclidean, manhattan, octile};
pub use error::{ConfigError, Endpoint};
pub use jps::{JumpPointSearch, SearchState};
pub use node::{Node, NodeArena, NodeState};
pub use path::{expand_path, path_cost};
pub use traits::{CostPolicy, DistanceMetric};
