//! Random obstacle maps.
//!
//! Two generators:
//! - [`random_grid`]: independent obstacles with a given density, the
//!   classic stress test for grid search.
//! - [`cave_grid`]: random walls smoothed by cellular automata, giving
//!   open caverns joined by narrow passages.

use gridjump_core::{Grid, Point};
use rand::Rng;

/// Generate a `width` x `height` grid where each cell is an obstacle with
/// probability `density`. Densities outside `[0, 1]` are clamped.
pub fn random_grid(width: i32, height: i32, density: f64, rng: &mut impl Rng) -> Grid {
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut grid = Grid::new(Point::ZERO, width, height);
    for p in grid.bounds() {
        if rng.random_bool(density) {
            grid.set_obstacle(p);
        }
    }
    log::debug!(
        "generated {}x{} random grid, density {:.2}: {} obstacles",
        width,
        height,
        density,
        grid.obstacle_count()
    );
    grid
}

/// Pick a uniformly random walkable cell, or `None` if there is none.
pub fn random_walkable(grid: &Grid, rng: &mut impl Rng) -> Option<Point> {
    let free = grid.len() - grid.obstacle_count();
    if free == 0 {
        return None;
    }
    let k = rng.random_range(0..free);
    grid.bounds().iter().filter(|&p| grid.is_walkable(p)).nth(k)
}

/// One smoothing pass of the cave generator.
#[derive(Debug, Clone)]
pub struct CaveRule {
    /// A cell becomes a wall if at least this many of its 8 neighbours are
    /// walls.
    pub wall_cutoff1: i32,
    /// A cell also becomes a wall if at most this many cells within
    /// distance 2 are walls, which breaks up large empty areas.
    pub wall_cutoff2: i32,
    /// Whether cells outside the grid count as walls.
    pub walls_outside: bool,
    /// How many times to apply this rule.
    pub reps: usize,
}

impl Default for CaveRule {
    fn default() -> Self {
        Self {
            wall_cutoff1: 5,
            wall_cutoff2: 2,
            walls_outside: true,
            reps: 4,
        }
    }
}

/// Generate a cave-like grid.
///
/// Each cell starts as a wall with probability `wall_init`, then every rule
/// in `rules` is applied for its number of repetitions.
pub fn cave_grid(
    width: i32,
    height: i32,
    wall_init: f64,
    rules: &[CaveRule],
    rng: &mut impl Rng,
) -> Grid {
    let mut grid = random_grid(width, height, wall_init, rng);
    let bounds = grid.bounds();
    let mut scratch = vec![false; grid.len()];

    for rule in rules {
        for _ in 0..rule.reps {
            for (i, p) in bounds.iter().enumerate() {
                let walls1 = count_walls(&grid, p, 1, rule.walls_outside);
                let walls2 = count_walls(&grid, p, 2, rule.walls_outside);
                scratch[i] = walls1 >= rule.wall_cutoff1 || walls2 <= rule.wall_cutoff2;
            }
            for (p, &wall) in bounds.iter().zip(&scratch) {
                if wall {
                    grid.set_obstacle(p);
                } else {
                    grid.clear_obstacle(p);
                }
            }
        }
    }

    log::debug!(
        "generated {}x{} cave: {} obstacles",
        width,
        height,
        grid.obstacle_count()
    );
    grid
}

/// Count walls within Chebyshev distance `radius` of `center`.
fn count_walls(grid: &Grid, center: Point, radius: i32, walls_outside: bool) -> i32 {
    let mut count = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            let p = center.shift(dx, dy);
            let wall = if grid.is_outside(p) {
                walls_outside
            } else {
                grid.is_obstacle(p)
            };
            if wall {
                count += 1;
            }
        }
    }
    count
}
