//! The [`Grid`] type: a walkability oracle over a rectangle of cells.
//!
//! A grid is built once (from explicit corners, a size, or a parsed map),
//! and is read-only while searches run against it. Every coordinate outside
//! the rectangle behaves like a wall.

use crate::direction::Direction;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// A rectangular, uniform-cost, 8-connected grid of free and blocked cells.
///
/// The dense store always holds exactly one cell per point of `bounds`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    bounds: Range,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create an obstacle-free grid of `width` x `height` cells whose
    /// lower-left cell is `origin`.
    ///
    /// A size whose far edge would not fit in `i32` is clipped to the last
    /// representable cell; [`try_new`](Self::try_new) rejects it instead.
    pub fn new(origin: Point, width: i32, height: i32) -> Self {
        let width = width.min(i32::MAX.saturating_sub(origin.x));
        let height = height.min(i32::MAX.saturating_sub(origin.y));
        Self::with_bounds(Range::with_size(origin, width, height).unwrap_or_default())
    }

    /// Like [`new`](Self::new), but fails when the grid does not fit in
    /// `i32` coordinates.
    pub fn try_new(origin: Point, width: i32, height: i32) -> Result<Self, GridError> {
        let bounds =
            Range::with_size(origin, width, height).ok_or(GridError::TooLarge {
                width: width.max(0) as usize,
                height: height.max(0) as usize,
            })?;
        Ok(Self::with_bounds(bounds))
    }

    fn with_bounds(bounds: Range) -> Self {
        Self {
            bounds,
            blocked: vec![false; bounds.len()],
        }
    }

    /// Create an obstacle-free grid from its four (inclusive) corner cells.
    ///
    /// Width is measured along the top edge and height along the left edge;
    /// the bottom-left corner becomes the origin.
    pub fn from_corners(
        top_left: Point,
        top_right: Point,
        bottom_left: Point,
        _bottom_right: Point,
    ) -> Result<Self, GridError> {
        let width = i64::from(top_right.x) - i64::from(top_left.x) + 1;
        let height = i64::from(top_left.y) - i64::from(bottom_left.y) + 1;
        let too_large = || GridError::TooLarge {
            width: usize::try_from(width).unwrap_or(usize::MAX),
            height: usize::try_from(height).unwrap_or(usize::MAX),
        };
        let width = i32::try_from(width).map_err(|_| too_large())?;
        let height = i32::try_from(height).map_err(|_| too_large())?;
        Self::try_new(bottom_left, width, height)
    }

    /// Build a grid from rows of `true` = blocked, listed **top row first**
    /// (the way maps are usually drawn). The origin is `(0, 0)`.
    ///
    /// Short rows are padded with free cells.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let row_count = rows.len();
        let col_count = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let too_large = || GridError::TooLarge {
            width: col_count,
            height: row_count,
        };
        let height = i32::try_from(row_count).map_err(|_| too_large())?;
        let width = i32::try_from(col_count).map_err(|_| too_large())?;
        let mut grid = Self::try_new(Point::ZERO, width, height)?;
        for (r, row) in rows.iter().enumerate() {
            // r < height and x < width, so both casts are lossless
            let y = height - 1 - r as i32;
            for (x, &b) in row.as_ref().iter().enumerate() {
                if b {
                    grid.set_obstacle(Point::new(x as i32, y));
                }
            }
        }
        Ok(grid)
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    // -----------------------------------------------------------------------
    // Corners
    // -----------------------------------------------------------------------

    pub fn bottom_left(&self) -> Point {
        self.bounds.min
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.bounds.max.x - 1, self.bounds.min.y)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.bounds.min.x, self.bounds.max.y - 1)
    }

    pub fn top_right(&self) -> Point {
        self.bounds.max.shift(-1, -1)
    }

    // -----------------------------------------------------------------------
    // Construction-time mutation
    // -----------------------------------------------------------------------

    /// Mark `p` as an obstacle. Returns `false` if `p` is outside the grid.
    pub fn set_obstacle(&mut self, p: Point) -> bool {
        self.mark(p, true)
    }

    /// Mark `p` as free. Returns `false` if `p` is outside the grid.
    pub fn clear_obstacle(&mut self, p: Point) -> bool {
        self.mark(p, false)
    }

    fn mark(&mut self, p: Point, blocked: bool) -> bool {
        match self.index(p).and_then(|i| self.blocked.get_mut(i)) {
            Some(cell) => {
                *cell = blocked;
                true
            }
            None => false,
        }
    }

    /// Number of blocked cells inside the grid.
    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    // -----------------------------------------------------------------------
    // Walkability queries
    // -----------------------------------------------------------------------

    /// Whether `p` lies outside the grid rectangle.
    #[inline]
    pub fn is_outside(&self, p: Point) -> bool {
        !self.bounds.contains(p)
    }

    /// Whether `p` is blocked. Cells outside the grid count as blocked so
    /// that the map border behaves like a wall.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.index(p)
            .and_then(|i| self.blocked.get(i).copied())
            .unwrap_or(true)
    }

    /// Whether `p` is inside the grid and free.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        !self.is_outside(p) && !self.is_obstacle(p)
    }

    /// Whether `to` can be entered from the adjacent cell `from`.
    ///
    /// The destination must be walkable. A diagonal move additionally needs
    /// at least one of its two shoulder cells `(from.x, to.y)` and
    /// `(to.x, from.y)` to be walkable: squeezing between two blocked
    /// shoulders is not allowed.
    ///
    /// ```text
    /// | # | to|
    /// |---|---|      blocked: from (0,0) cannot reach (1,1)
    /// |fr | # |
    /// ```
    #[inline]
    pub fn reachable(&self, from: Point, to: Point) -> bool {
        if !self.is_walkable(to) {
            return false;
        }
        if from.x == to.x || from.y == to.y {
            return true;
        }
        self.is_walkable(Point::new(from.x, to.y)) || self.is_walkable(Point::new(to.x, from.y))
    }

    /// Whether a single step in `dir` from `p` is legal.
    #[inline]
    pub fn can_step(&self, p: Point, dir: Direction) -> bool {
        self.reachable(p, p + dir.offset())
    }

    /// Append every cell reachable in one step from `p` into `buf`.
    /// The caller clears `buf` before calling.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for dir in Direction::ALL {
            let n = p + dir.offset();
            if self.reachable(p, n) {
                buf.push(n);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a dense row-major index. Returns `None` if out
    /// of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Convert a dense index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        let x = (idx % w) as i32 + self.bounds.min.x;
        let y = (idx / w) as i32 + self.bounds.min.y;
        Point::new(x, y)
    }
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    bounds: Range,
    blocked: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let GridRepr { bounds, blocked } = repr;
        let (min, max) = (bounds.min, bounds.max);
        let width = (i64::from(max.x) - i64::from(min.x)).abs();
        let height = (i64::from(max.y) - i64::from(min.y)).abs();
        let limit = i64::from(i32::MAX);
        if width > limit || height > limit {
            return Err(GridError::TooLarge {
                width: usize::try_from(width).unwrap_or(usize::MAX),
                height: usize::try_from(height).unwrap_or(usize::MAX),
            });
        }
        let bounds = Range::new(min.x, min.y, max.x, max.y);
        if blocked.len() != bounds.len() {
            return Err(GridError::StoreMismatch {
                bounds,
                expected: bounds.len(),
                found: blocked.len(),
            });
        }
        Ok(Self { bounds, blocked })
    }
}
