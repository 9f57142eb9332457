use crate::geom::Range;

/// A grid that cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("a {width}x{height} grid does not fit in i32 coordinates")]
    TooLarge { width: usize, height: usize },
    #[error("grid {bounds} needs {expected} cells, found {found}")]
    StoreMismatch {
        bounds: Range,
        expected: usize,
        found: usize,
    },
}
