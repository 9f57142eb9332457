use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use gridjump_core::Point;

use crate::error::ConfigError;
use crate::traits::DistanceMetric;

#[inline]
fn deltas(a: Point, b: Point) -> (f64, f64) {
    (f64::from((a.x - b.x).abs()), f64::from((a.y - b.y).abs()))
}

/// Manhattan (L1) distance between two points.
///
/// Only admissible for 4-directional movement: it overestimates diagonal
/// steps on an 8-connected grid.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx + dy
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    (dx + dy) - dx.min(dy)
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.hypot(dy)
}

/// Octile distance: the exact cost of an unobstructed 8-directional path
/// with unit straight steps and √2 diagonal steps.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    (dx + dy) + (SQRT_2 - 2.0) * dx.min(dy)
}

/// The built-in distance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    Manhattan,
    Chebyshev,
    Euclidean,
    #[default]
    Octile,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Manhattan,
        Metric::Chebyshev,
        Metric::Euclidean,
        Metric::Octile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
            Metric::Euclidean => "euclidean",
            Metric::Octile => "octile",
        }
    }
}

impl DistanceMetric for Metric {
    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        match self {
            Metric::Manhattan => manhattan(a, b),
            Metric::Chebyshev => chebyshev(a, b),
            Metric::Euclidean => euclidean(a, b),
            Metric::Octile => octile(a, b),
        }
    }

    fn overestimates_diagonals(&self) -> bool {
        matches!(self, Metric::Manhattan)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownStrategy {
                kind: "distance metric",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn known_values() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5); // dx = 3, dy = 4
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(chebyshev(a, b), 4.0);
        assert!((euclidean(a, b) - 5.0).abs() < EPS);
        assert!((octile(a, b) - (1.0 + 3.0 * SQRT_2)).abs() < EPS);
    }

    #[test]
    fn symmetric_and_zero_on_identity() {
        let a = Point::new(-2, 7);
        let b = Point::new(5, 3);
        for m in Metric::ALL {
            assert_eq!(m.distance(a, b), m.distance(b, a), "{m}");
            assert_eq!(m.distance(a, a), 0.0, "{m}");
            assert!(m.distance(a, b) > 0.0, "{m}");
        }
    }

    #[test]
    fn octile_is_exact_for_pure_diagonals_and_straights() {
        let o = Point::ZERO;
        assert!((octile(o, Point::new(4, 4)) - 4.0 * SQRT_2).abs() < EPS);
        assert_eq!(octile(o, Point::new(0, 6)), 6.0);
        assert!((euclidean(o, Point::new(4, -4)) - 4.0 * SQRT_2).abs() < EPS);
    }

    #[test]
    fn admissible_metrics_never_exceed_octile() {
        for x in -5..=5 {
            for y in -5..=5 {
                let p = Point::new(x, y);
                let exact = octile(Point::ZERO, p);
                assert!(chebyshev(Point::ZERO, p) <= exact + EPS);
                assert!(euclidean(Point::ZERO, p) <= exact + EPS);
            }
        }
        assert!(manhattan(Point::ZERO, Point::new(3, 3)) > octile(Point::ZERO, Point::new(3, 3)));
        assert!(Metric::Manhattan.overestimates_diagonals());
        assert!(!Metric::Octile.overestimates_diagonals());
    }

    #[test]
    fn parse_names() {
        assert_eq!("octile".parse::<Metric>().unwrap(), Metric::Octile);
        assert_eq!("Euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert!(matches!(
            "taxicab".parse::<Metric>(),
            Err(ConfigError::UnknownStrategy { .. })
        ));
    }
}
