//! The eight compass directions of a square grid.

use std::fmt;

use crate::geom::Point;

/// One of the eight moves available on an 8-connected grid.
///
/// Offsets follow the Cartesian frame: `North` is `(0, 1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
}

use Direction::*;

/// Offset → direction lookup, indexed by `[dx + 1][dy + 1]`.
const OFFSET_TABLE: [[Option<Direction>; 3]; 3] = [
    [Some(SouthWest), Some(West), Some(NorthWest)],
    [Some(South), None, Some(North)],
    [Some(SouthEast), Some(East), Some(NorthEast)],
];

impl Direction {
    /// All eight directions, cardinals and diagonals interleaved clockwise
    /// starting from west.
    pub const ALL: [Direction; 8] = [
        West, NorthWest, North, NorthEast, East, SouthEast, South, SouthWest,
    ];

    /// Horizontal component of the offset.
    #[inline]
    pub const fn dx(self) -> i32 {
        match self {
            West | NorthWest | SouthWest => -1,
            North | South => 0,
            East | NorthEast | SouthEast => 1,
        }
    }

    /// Vertical component of the offset.
    #[inline]
    pub const fn dy(self) -> i32 {
        match self {
            South | SouthWest | SouthEast => -1,
            West | East => 0,
            North | NorthWest | NorthEast => 1,
        }
    }

    /// The unit offset of this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        Point::new(self.dx(), self.dy())
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.dx() != 0 && self.dy() != 0
    }

    /// Map an offset in `{-1, 0, 1}²` back to a direction.
    ///
    /// Returns `None` for `(0, 0)` and for components outside `-1..=1`.
    #[inline]
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return None;
        }
        OFFSET_TABLE[(dx + 1) as usize][(dy + 1) as usize]
    }

    /// Direction of travel from `from` towards `to`, each axis clamped to
    /// `-1..=1`. `None` when the points coincide.
    #[inline]
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let d = (to - from).signum();
        Self::from_offset(d.x, d.y)
    }

    /// Horizontal sub-direction (`East` or `West`), if any.
    #[inline]
    pub fn horizontal(self) -> Option<Direction> {
        Self::from_offset(self.dx(), 0)
    }

    /// Vertical sub-direction (`North` or `South`), if any.
    #[inline]
    pub fn vertical(self) -> Option<Direction> {
        Self::from_offset(0, self.dy())
    }

}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            West => "W",
            NorthWest => "NW",
            North => "N",
            NorthEast => "NE",
            East => "E",
            SouthEast => "SE",
            South => "S",
            SouthWest => "SW",
        };
        f.write_str(name)
    }
}
