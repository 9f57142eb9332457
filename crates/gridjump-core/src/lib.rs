//! **gridjump-core**: core types for uniform-cost grid pathfinding.
//!
//! This crate provides the foundational types used across the *gridjump*
//! workspace: geometry primitives in a Cartesian frame (origin lower-left,
//! y growing north), the eight compass [`Direction`]s, and the walkability
//! [`Grid`] the search engine queries.

pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;

pub use direction::Direction;
pub use error::GridError;
pub use geom::{Point, Range, RangeIter};
pub use grid::Grid;
