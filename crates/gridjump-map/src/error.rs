use std::path::PathBuf;

use gridjump_core::GridError;

/// A map that could not be read or understood.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map header is missing `{0}`")]
    MissingHeader(&'static str),
    #[error("line {line}: invalid header `{text}`")]
    InvalidHeader { line: usize, text: String },
    #[error("expected {expected} map rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("map row {row} is {found} cells wide, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("cannot read map {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
