//! Map collaborators for gridjump.
//!
//! Everything needed to get a [`Grid`](gridjump_core::Grid) in and out of
//! the search: MovingAI `.map` files, conversion from the top-left screen
//! frame, random obstacle maps and an ASCII renderer.

pub mod error;
pub mod mapgen;
pub mod movingai;
pub mod render;
pub mod screen;

pub use error::MapError;
pub use mapgen::{CaveRule, cave_grid, random_grid, random_walkable};
pub use movingai::{is_passable, load_map, parse_map};
pub use render::render;
pub use screen::{to_cartesian, to_screen};
