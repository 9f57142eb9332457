//! The `jps` command: load or generate a map, run one Jump Point Search
//! and report the result.
//!
//! Besides the path itself the report can check the search against a
//! plain A* (`--verify`) and against a list of expected jump points
//! (`--expect`), which is how benchmark scenarios are replayed.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use gridjump_core::{Grid, Point};
use gridjump_map::{
    MapError, load_map, random_grid, random_walkable, render, to_cartesian, to_screen,
};
use gridjump_paths::{
    ConfigError, Cost, Endpoint, Metric, SearchConfig, astar_path, expand_path, path_cost,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COST_EPS: f64 = 1e-6;

#[derive(Parser, Debug)]
#[command(name = "jps", version, about = "Jump Point Search on grid maps", long_about = None)]
pub struct Cli {
    /// MovingAI map file to search
    #[arg(long, conflicts_with = "random")]
    pub map: Option<PathBuf>,

    /// Generate a random WIDTHxHEIGHT map instead of loading one
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub random: Option<(i32, i32)>,

    /// Obstacle density of a random map
    #[arg(long, default_value_t = 0.2, value_parser = parse_density)]
    pub density: f64,

    /// Seed for the random map and random endpoints
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start point as X,Y (random walkable cell on a random map if omitted)
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub start: Option<Point>,

    /// Goal point as X,Y (random walkable cell on a random map if omitted)
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub goal: Option<Point>,

    /// Points are given and printed in the screen frame (row 0 on top)
    #[arg(long)]
    pub screen: bool,

    /// JSON search configuration; the flags below override it
    #[arg(long, value_name = "FILE.json")]
    pub config: Option<PathBuf>,

    /// Open set ordering: astar, dijkstra or greedy
    #[arg(long)]
    pub cost: Option<Cost>,

    /// Edge cost between jump points: manhattan, chebyshev, euclidean or octile
    #[arg(long)]
    pub distance: Option<Metric>,

    /// Heuristic: manhattan, chebyshev, euclidean or octile
    #[arg(long)]
    pub heuristic: Option<Metric>,

    /// Also print every cell along the path
    #[arg(long)]
    pub expand: bool,

    /// Compare the path cost with a plain 8-connected A*
    #[arg(long)]
    pub verify: bool,

    /// Draw the map with the path on it
    #[arg(long)]
    pub render: bool,

    /// Expected jump points, e.g. "3,4 7,4 9,6"
    #[arg(long, value_name = "POINTS", value_parser = parse_points)]
    pub expect: Option<PointList>,
}

/// A whitespace separated list of points given as one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointList(pub Vec<Point>);

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no map given: pass --map FILE or --random WxH")]
    NoMap,
    #[error("--{0} is required with --map")]
    MissingEndpoint(Endpoint),
    #[error("random map has no walkable cell for the {0}")]
    NoWalkableCell(Endpoint),
    #[error(transparent)]
    Output(#[from] io::Error),
}

/// Run the command and write its report to `out`.
///
/// Returns `Ok(false)` when a requested check (`--verify`, `--expect`)
/// failed.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<bool, CliError> {
    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    let grid = match (&cli.map, cli.random) {
        (Some(path), _) => {
            let grid = load_map(path)?;
            writeln!(
                out,
                "map: {} ({}x{}, {} obstacles)",
                path.display(),
                grid.width(),
                grid.height(),
                grid.obstacle_count()
            )?;
            grid
        }
        (None, Some((w, h))) => {
            let grid = random_grid(w, h, cli.density, &mut rng);
            writeln!(
                out,
                "map: random {}x{}, density {:.2}, seed {} ({} obstacles)",
                w,
                h,
                cli.density,
                seed,
                grid.obstacle_count()
            )?;
            grid
        }
        (None, None) => return Err(CliError::NoMap),
    };

    let frame = Frame {
        screen: cli.screen,
        height: grid.height(),
    };
    let random_map = cli.map.is_none();
    let start = endpoint(cli.start, Endpoint::Start, random_map, frame, &grid, &mut rng)?;
    let goal = endpoint(cli.goal, Endpoint::Goal, random_map, frame, &grid, &mut rng)?;

    let config = search_config(cli)?;
    log::debug!("search config: {config:?}");
    let mut search = config.build(&grid, start, goal)?;

    let began = Instant::now();
    let path = search.run();
    let elapsed = began.elapsed();

    writeln!(
        out,
        "start: {}  goal: {}",
        frame.show(start),
        frame.show(goal)
    )?;
    writeln!(
        out,
        "strategy: {} / distance {} / heuristic {}",
        config.cost, config.distance, config.heuristic
    )?;
    match search.path_cost() {
        Some(cost) => {
            writeln!(out, "path: {}", frame.join(&path))?;
            writeln!(out, "cost: {cost:.3}")?;
        }
        None => writeln!(out, "path: none")?,
    }
    writeln!(out, "expanded: {}", search.expanded())?;
    writeln!(out, "time: {:.3} ms", elapsed.as_secs_f64() * 1e3)?;

    let found = search.path_cost().is_some();
    let steps = if found { expand_path(start, &path) } else { None };
    if cli.expand {
        if let Some(steps) = &steps {
            writeln!(out, "steps: {}", frame.join(steps))?;
        }
    }

    let mut ok = true;
    if cli.verify {
        ok &= verify(&grid, start, goal, &path, found, out)?;
    }
    if let Some(PointList(expected)) = &cli.expect {
        let expected: Vec<Point> = expected.iter().map(|&p| frame.import(p)).collect();
        ok &= compare_expected(&expected, &path, frame, out)?;
    }

    if cli.render {
        let cells = steps.unwrap_or_else(|| vec![start, goal]);
        write!(out, "{}", render(&grid, &cells))?;
    }
    Ok(ok)
}

/// Coordinate frame used on the command line.
#[derive(Debug, Clone, Copy)]
struct Frame {
    screen: bool,
    height: i32,
}

impl Frame {
    fn import(self, p: Point) -> Point {
        if self.screen {
            to_cartesian(p, self.height)
        } else {
            p
        }
    }

    fn show(self, p: Point) -> Point {
        if self.screen {
            to_screen(p, self.height)
        } else {
            p
        }
    }

    fn join(self, points: &[Point]) -> String {
        points
            .iter()
            .map(|&p| self.show(p).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn endpoint(
    given: Option<Point>,
    which: Endpoint,
    random_map: bool,
    frame: Frame,
    grid: &Grid,
    rng: &mut StdRng,
) -> Result<Point, CliError> {
    match given {
        Some(p) => Ok(frame.import(p)),
        None if random_map => random_walkable(grid, rng).ok_or(CliError::NoWalkableCell(which)),
        None => Err(CliError::MissingEndpoint(which)),
    }
}

fn search_config(cli: &Cli) -> Result<SearchConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };
    if let Some(cost) = cli.cost {
        config.cost = cost;
    }
    if let Some(distance) = cli.distance {
        config.distance = distance;
    }
    if let Some(heuristic) = cli.heuristic {
        config.heuristic = heuristic;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<SearchConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn verify(
    grid: &Grid,
    start: Point,
    goal: Point,
    path: &[Point],
    found: bool,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let reference = astar_path(grid, start, goal, &Metric::Octile, &Metric::Octile);
    let ok = match (&reference, found) {
        (None, false) => {
            writeln!(out, "verify: ok (unreachable)")?;
            true
        }
        (Some(r), true) => {
            let cost = path_cost(start, path, &Metric::Octile);
            if (cost - r.cost).abs() < COST_EPS {
                writeln!(out, "verify: ok (octile cost {:.3})", r.cost)?;
                true
            } else {
                writeln!(
                    out,
                    "verify: FAILED octile cost {:.3}, astar {:.3}",
                    cost, r.cost
                )?;
                false
            }
        }
        (Some(r), false) => {
            writeln!(out, "verify: FAILED no path, astar cost {:.3}", r.cost)?;
            false
        }
        (None, true) => {
            writeln!(out, "verify: FAILED astar found no path")?;
            false
        }
    };
    Ok(ok)
}

fn compare_expected(
    expected: &[Point],
    path: &[Point],
    frame: Frame,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let mismatch = expected
        .iter()
        .zip(path)
        .position(|(e, p)| e != p);
    match mismatch {
        Some(i) => {
            writeln!(
                out,
                "expect: FAILED at jump point {}: expected {}, got {}",
                i + 1,
                frame.show(expected[i]),
                frame.show(path[i])
            )?;
            Ok(false)
        }
        None if expected.len() != path.len() => {
            writeln!(
                out,
                "expect: FAILED expected {} jump points, got {}",
                expected.len(),
                path.len()
            )?;
            Ok(false)
        }
        None => {
            writeln!(out, "expect: ok ({} jump points)", path.len())?;
            Ok(true)
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("`{s}` is not X,Y"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in `{s}`"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in `{s}`"))?;
    Ok(Point::new(x, y))
}

fn parse_points(s: &str) -> Result<PointList, String> {
    s.split_whitespace()
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()
        .map(PointList)
}

fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("`{s}` is not WIDTHxHEIGHT"))?;
    let dim = |v: &str| -> Result<i32, String> {
        v.trim()
            .parse::<i32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("bad dimension `{v}` in `{s}`"))
    };
    Ok((dim(w)?, dim(h)?))
}

fn parse_density(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .ok()
        .filter(|d| (0.0..=1.0).contains(d))
        .ok_or_else(|| format!("density `{s}` is not between 0 and 1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jps").chain(args.iter().copied())).unwrap()
    }

    fn report(args: &[&str]) -> (Result<bool, CliError>, String) {
        let mut out = Vec::new();
        let result = run(&cli(args), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn write_map(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jps-{}-{name}", std::process::id()));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn parses_points_sizes_and_densities() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 3 , -1"), Ok(Point::new(3, -1)));
        assert!(parse_point("3;4").is_err());
        assert_eq!(
            parse_points("1,1  2,2"),
            Ok(PointList(vec![Point::new(1, 1), Point::new(2, 2)]))
        );
        assert_eq!(parse_size("64x32"), Ok((64, 32)));
        assert!(parse_size("0x3").is_err());
        assert!(parse_density("1.5").is_err());
        assert_eq!(parse_density("0.25"), Ok(0.25));
    }

    #[test]
    fn strategies_parse_from_flags() {
        let c = cli(&["--random", "8x8", "--cost", "dijkstra", "--heuristic", "euclidean"]);
        assert_eq!(c.cost, Some(Cost::Dijkstra));
        assert_eq!(c.heuristic, Some(Metric::Euclidean));
        assert!(Cli::try_parse_from(["jps", "--cost", "fastest"]).is_err());
        assert!(Cli::try_parse_from(["jps", "--map", "a.map", "--random", "4x4"]).is_err());
    }

    #[test]
    fn open_map_matches_expected_jump_points() {
        let (result, text) = report(&[
            "--random", "5x5", "--density", "0", "--start", "0,0", "--goal", "4,4",
            "--verify", "--expect", "4,4",
        ]);
        assert!(result.unwrap());
        assert!(text.contains("path: (4, 4)"), "{text}");
        assert!(text.contains("cost: 5.657"), "{text}");
        assert!(text.contains("verify: ok"), "{text}");
        assert!(text.contains("expect: ok (1 jump points)"), "{text}");
    }

    #[test]
    fn reports_first_expected_mismatch() {
        let (result, text) = report(&[
            "--random", "5x5", "--density", "0", "--start", "0,0", "--goal", "4,4",
            "--expect", "3,3 4,4",
        ]);
        assert!(!result.unwrap());
        assert!(
            text.contains("expect: FAILED at jump point 1: expected (3, 3), got (4, 4)"),
            "{text}"
        );
    }

    #[test]
    fn loads_map_in_screen_frame() {
        let path = write_map(
            "screen.map",
            "type octile\nheight 3\nwidth 5\nmap\n..@..\n..@..\n.....\n",
        );
        let map = path.to_string_lossy().into_owned();
        let (result, text) = report(&[
            "--map", &map, "--screen", "--start", "0,0", "--goal", "4,0", "--expand",
            "--render", "--verify", "--expect", "2,2 4,0",
        ]);
        fs::remove_file(&path).unwrap();
        assert!(result.unwrap(), "{text}");
        assert!(text.contains("start: (0, 0)  goal: (4, 0)"), "{text}");
        assert!(text.contains("path: (2, 2) (4, 0)"), "{text}");
        assert!(
            text.contains("steps: (0, 0) (1, 1) (2, 2) (3, 1) (4, 0)"),
            "{text}"
        );
        assert!(text.contains("S.@.G\n.*@*.\n..*..\n"), "{text}");
    }

    #[test]
    fn unreachable_goal_is_reported_not_an_error() {
        let path = write_map("walled.map", "height 1\nwidth 3\nmap\n.@.\n");
        let map = path.to_string_lossy().into_owned();
        let (result, text) = report(&["--map", &map, "--start", "0,0", "--goal", "2,0", "--verify"]);
        fs::remove_file(&path).unwrap();
        assert!(result.unwrap());
        assert!(text.contains("path: none"), "{text}");
        assert!(text.contains("verify: ok (unreachable)"), "{text}");
    }

    #[test]
    fn config_file_then_flag_overrides() {
        let path = write_map("config.json", r#"{ "cost": "greedy", "distance": "euclidean" }"#);
        let file = path.to_string_lossy().into_owned();
        let c = cli(&["--random", "4x4", "--config", &file, "--cost", "dijkstra"]);
        let config = search_config(&c);
        fs::remove_file(&path).unwrap();
        let config = config.unwrap();
        assert_eq!(config.cost, Cost::Dijkstra);
        assert_eq!(config.distance, Metric::Euclidean);
        assert_eq!(config.heuristic, Metric::Octile);
    }

    #[test]
    fn random_map_picks_reproducible_endpoints() {
        let args = ["--random", "20x20", "--density", "0.2", "--seed", "17", "--verify"];
        let (first, a) = report(&args);
        let (second, b) = report(&args);
        assert!(first.unwrap());
        assert!(second.unwrap());
        let without_time = |s: &str| -> String {
            s.lines()
                .filter(|l| !l.starts_with("time:"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_eq!(without_time(&a), without_time(&b));
    }

    #[test]
    fn errors() {
        let (result, _) = report(&["--start", "0,0", "--goal", "1,1"]);
        assert!(matches!(result, Err(CliError::NoMap)));

        let path = write_map("blocked.map", "height 2\nwidth 2\nmap\n.@\n..\n");
        let map = path.to_string_lossy().into_owned();
        let (missing, _) = report(&["--map", &map, "--start", "0,0"]);
        let (blocked, _) = report(&["--map", &map, "--start", "0,0", "--goal", "1,1"]);
        fs::remove_file(&path).unwrap();
        assert!(matches!(
            missing,
            Err(CliError::MissingEndpoint(Endpoint::Goal))
        ));
        let err = blocked.unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Blocked { .. })));
        assert_eq!(err.to_string(), "goal (1, 1) is on an obstacle");

        let (bad_map, _) = report(&["--map", "/nonexistent/jps.map", "--start", "0,0", "--goal", "1,1"]);
        assert!(matches!(bad_map, Err(CliError::Map(MapError::Io { .. }))));
    }
}
