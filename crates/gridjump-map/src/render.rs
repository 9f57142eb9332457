use gridjump_core::{Grid, Point};

/// Draw `grid` as ASCII art, top row first, one line per row.
///
/// Obstacles are `@` and free cells `.`, as in a MovingAI map. `path` is a
/// step-by-step path (see `gridjump_paths::expand_path`): its first cell is
/// drawn as `S`, its last as `G` and the cells between as `*`. Path cells
/// outside the grid are ignored.
pub fn render(grid: &Grid, path: &[Point]) -> String {
    let bounds = grid.bounds();
    let width = bounds.width().max(0) as usize;
    let mut canvas: Vec<char> = vec!['.'; grid.len()];

    // canvas is row-major, top row first
    let slot = |p: Point| -> Option<usize> {
        if !bounds.contains(p) {
            return None;
        }
        let col = (p.x - bounds.min.x) as usize;
        let row = (bounds.max.y - 1 - p.y) as usize;
        Some(row * width + col)
    };

    for p in bounds.iter().filter(|&p| grid.is_obstacle(p)) {
        if let Some(i) = slot(p) {
            canvas[i] = '@';
        }
    }
    let last = path.len().saturating_sub(1);
    for (k, &p) in path.iter().enumerate() {
        let mark = match k {
            0 => 'S',
            k if k == last => 'G',
            _ => '*',
        };
        if let Some(i) = slot(p) {
            canvas[i] = mark;
        }
    }

    let mut out = String::with_capacity(canvas.len() + bounds.height().max(0) as usize);
    for row in canvas.chunks(width.max(1)) {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movingai::parse_map;

    #[test]
    fn draws_obstacles_top_first() {
        let grid = Grid::from_rows(&[[true, false, false], [false, false, true]]).unwrap();
        assert_eq!(render(&grid, &[]), "@..\n..@\n");
    }

    #[test]
    fn marks_path_cells() {
        let grid = Grid::new(Point::ZERO, 4, 2);
        let path = [
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(3, 1),
        ];
        assert_eq!(render(&grid, &path), ".**G\nS...\n");
    }

    #[test]
    fn rendered_map_parses_back() {
        let grid = Grid::from_rows(&[[false, true], [true, false], [false, false]]).unwrap();
        let text = format!("height 3\nwidth 2\nmap\n{}", render(&grid, &[]));
        assert_eq!(parse_map(&text).unwrap(), grid);
    }
}
