//! Conversion between the screen frame and the Cartesian grid frame.
//!
//! Grids use a Cartesian frame: origin at the bottom-left, y growing
//! northwards. Most tools (and MovingAI benchmark scenarios) use a screen
//! frame instead, with x the column and y the row counted from the top.

use gridjump_core::Point;

/// Convert a screen point on a map `height` rows tall to Cartesian.
#[inline]
pub fn to_cartesian(p: Point, height: i32) -> Point {
    Point::new(p.x, height - 1 - p.y)
}

/// Convert a Cartesian point on a map `height` rows tall to the screen frame.
#[inline]
pub fn to_screen(p: Point, height: i32) -> Point {
    to_cartesian(p, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_is_origin_on_screen() {
        assert_eq!(to_cartesian(Point::new(0, 0), 10), Point::new(0, 9));
        assert_eq!(to_cartesian(Point::new(3, 9), 10), Point::new(3, 0));
        assert_eq!(to_screen(Point::new(3, 0), 10), Point::new(3, 9));
    }

    #[test]
    fn conversion_is_its_own_inverse() {
        for y in 0..5 {
            for x in 0..3 {
                let p = Point::new(x, y);
                assert_eq!(to_screen(to_cartesian(p, 5), 5), p);
            }
        }
    }
}
