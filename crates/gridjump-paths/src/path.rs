use gridjump_core::{Direction, Point};

use crate::traits::DistanceMetric;

/// Expand a jump-point path into single-cell steps.
///
/// `jump_points` is the output of a search (start excluded). The returned
/// path starts with `start` and ends with the last jump point; every pair
/// of consecutive points is one step apart. Repeated points are skipped.
///
/// Returns `None` if two consecutive points do not share a row, a column
/// or a diagonal.
pub fn expand_path(start: Point, jump_points: &[Point]) -> Option<Vec<Point>> {
    let mut result = vec![start];
    let mut c = start;
    for &jp in jump_points {
        let (dx, dy) = (c.x.abs_diff(jp.x), c.y.abs_diff(jp.y));
        if dx != 0 && dy != 0 && dx != dy {
            return None;
        }
        let Some(dir) = Direction::between(c, jp) else {
            continue;
        };
        let steps = i32::try_from(dx.max(dy)).ok()?;
        result.extend((1..=steps).map(|k| c + dir.offset() * k));
        c = jp;
    }
    Some(result)
}

/// Total cost of walking from `start` through `path`, measured with `metric`.
pub fn path_cost(start: Point, path: &[Point], metric: &impl DistanceMetric) -> f64 {
    let mut prev = start;
    let mut total = 0.0;
    for &p in path {
        total += metric.distance(prev, p);
        prev = p;
    }
    total
}
