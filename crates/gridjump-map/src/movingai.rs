//! MovingAI `.map` files.
//!
//! ```text
//! type octile
//! height 3
//! width 4
//! map
//! @...
//! .@G.
//! S..T
//! ```
//!
//! Rows are listed top row first, so file row `r` becomes Cartesian
//! `y = height - 1 - r`. Only `.`, `G` and `S` are passable.

use std::fs;
use std::path::Path;

use gridjump_core::{Grid, GridError, Point};

use crate::error::MapError;

/// Whether a MovingAI terrain character can be walked on.
#[inline]
pub fn is_passable(ch: char) -> bool {
    matches!(ch, '.' | 'G' | 'S')
}

/// Parse a MovingAI map from text.
pub fn parse_map(text: &str) -> Result<Grid, MapError> {
    let mut lines = text.lines().enumerate();
    let mut width = None;
    let mut height = None;
    let mut has_map = false;

    for (i, raw) in lines.by_ref() {
        let line = raw.trim();
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else {
            continue;
        };
        match key {
            "map" => {
                has_map = true;
                break;
            }
            "height" => height = Some(header_value(i, line, parts.next())?),
            "width" => width = Some(header_value(i, line, parts.next())?),
            "type" => {}
            _ => log::debug!("ignoring map header line {}: {line}", i + 1),
        }
    }

    let height = height.ok_or(MapError::MissingHeader("height"))?;
    let width = width.ok_or(MapError::MissingHeader("width"))?;
    if !has_map {
        return Err(MapError::MissingHeader("map"));
    }

    let mut rows: Vec<&str> = lines.map(|(_, l)| l).collect();
    while rows.last().is_some_and(|r| r.trim().is_empty()) {
        rows.pop();
    }
    if rows.len() != height {
        return Err(MapError::RowCount {
            expected: height,
            found: rows.len(),
        });
    }

    if let Some((row, found)) = rows
        .iter()
        .map(|r| r.chars().count())
        .enumerate()
        .find(|&(_, n)| n != width)
    {
        return Err(MapError::RowWidth {
            row,
            expected: width,
            found,
        });
    }

    let too_large = || GridError::TooLarge { width, height };
    let w = i32::try_from(width).map_err(|_| too_large())?;
    let h = i32::try_from(height).map_err(|_| too_large())?;
    let mut grid = Grid::try_new(Point::ZERO, w, h)?;
    for (r, row) in rows.iter().enumerate() {
        // r < h and x < w, so both casts are lossless
        let y = h - 1 - r as i32;
        for (x, ch) in row.chars().enumerate() {
            if !is_passable(ch) {
                grid.set_obstacle(Point::new(x as i32, y));
            }
        }
    }

    log::debug!(
        "parsed {}x{} map with {} obstacles",
        width,
        height,
        grid.obstacle_count()
    );
    Ok(grid)
}

/// Read and parse a MovingAI map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<Grid, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loading map {}", path.display());
    parse_map(&text)
}

fn header_value(i: usize, line: &str, value: Option<&str>) -> Result<usize, MapError> {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0 && i32::try_from(n).is_ok())
        .ok_or_else(|| MapError::InvalidHeader {
            line: i + 1,
            text: line.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
type octile
height 3
width 4
map
@...
.@G.
S..T
";

    #[test]
    fn rows_are_listed_top_first() {
        let grid = parse_map(SMALL).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_obstacle(Point::new(0, 2)));
        assert!(grid.is_obstacle(Point::new(1, 1)));
        assert!(grid.is_obstacle(Point::new(3, 0)));
        assert_eq!(grid.obstacle_count(), 3);
    }

    #[test]
    fn start_and_goal_markers_are_passable() {
        let grid = parse_map(SMALL).unwrap();
        assert!(grid.is_walkable(Point::new(2, 1)));
        assert!(grid.is_walkable(Point::new(0, 0)));
    }

    #[test]
    fn header_order_and_blank_lines_are_tolerated() {
        let text = "width 2\r\n\r\nheight 1\r\nmap\r\n.@\r\n\r\n";
        let grid = parse_map(text).unwrap();
        assert_eq!(grid.width(), 2);
        assert!(grid.is_walkable(Point::new(0, 0)));
        assert!(grid.is_obstacle(Point::new(1, 0)));
    }

    #[test]
    fn missing_headers() {
        assert!(matches!(
            parse_map("width 2\nmap\n..\n"),
            Err(MapError::MissingHeader("height"))
        ));
        assert!(matches!(
            parse_map("height 1\nwidth 2\n"),
            Err(MapError::MissingHeader("map"))
        ));
    }

    #[test]
    fn invalid_header_value() {
        let err = parse_map("height ten\nwidth 2\nmap\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidHeader { line: 1, .. }));
        let err = parse_map("height 1\nwidth 0\nmap\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidHeader { line: 2, .. }));
    }

    #[test]
    fn row_count_mismatch() {
        let err = parse_map("height 3\nwidth 2\nmap\n..\n..\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::RowCount {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn row_width_mismatch() {
        let err = parse_map("height 2\nwidth 3\nmap\n...\n..\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::RowWidth {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
        assert_eq!(err.to_string(), "map row 1 is 2 cells wide, expected 3");
    }

    #[test]
    fn huge_declared_width_fails_on_the_rows() {
        let err = parse_map("height 1\nwidth 2000000000\nmap\n..\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::RowWidth {
                row: 0,
                expected: 2_000_000_000,
                found: 2
            }
        ));
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("gridjump-map-{}.map", std::process::id()));
        fs::write(&path, SMALL).unwrap();
        let grid = load_map(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(grid.unwrap().obstacle_count(), 3);
    }

    #[test]
    fn load_missing_file() {
        let err = load_map("/nonexistent/gridjump/none.map").unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read map /nonexistent/gridjump/none.map"));
    }
}
