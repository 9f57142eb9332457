use std::fmt;

use gridjump_core::{Point, Range};

/// Which end of the search a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// A search that cannot start. Raised before the search loop runs.
///
/// An unreachable goal is not an error: the search simply ends with an
/// empty path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{endpoint} {pos} is outside the grid {bounds}")]
    OutsideGrid {
        endpoint: Endpoint,
        pos: Point,
        bounds: Range,
    },
    #[error("{endpoint} {pos} is on an obstacle")]
    Blocked { endpoint: Endpoint, pos: Point },
    #[error("no {0} configured")]
    Missing(&'static str),
    #[error("unknown {kind} `{name}`")]
    UnknownStrategy { kind: &'static str, name: String },
}
