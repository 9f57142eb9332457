//! Jump Point Search (JPS) on uniform-cost 8-connected grids.
//!
//! JPS is an optimised A* variant for grids where every straight step costs
//! 1 and every diagonal step costs √2. It "jumps" along straight and
//! diagonal runs, only adding nodes to the open set at *jump points*:
//! cells where an optimal path may change direction because an obstacle
//! beside the run forces a neighbour.

use std::collections::BinaryHeap;

use gridjump_core::{Direction, Grid, Point};

use crate::error::{ConfigError, Endpoint};
use crate::node::{NodeArena, NodeRef, NodeState};
use crate::traits::{CostPolicy, DistanceMetric};

/// Lifecycle of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Configured, open and closed sets empty.
    Idle,
    /// The main loop is expanding nodes.
    Running,
    /// The goal was expanded; the path is available.
    Found,
    /// The open set ran dry without reaching the goal.
    Exhausted,
}

impl SearchState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Found | SearchState::Exhausted)
    }
}

/// A configured Jump Point Search over one grid.
///
/// The engine borrows the grid and owns all transient search state, so
/// several engines can search the same grid independently.
pub struct JumpPointSearch<'g> {
    grid: &'g Grid,
    start: Point,
    goal: Point,
    cost: Box<dyn CostPolicy + 'g>,
    distance: Box<dyn DistanceMetric + 'g>,
    heuristic: Box<dyn DistanceMetric + 'g>,
    arena: NodeArena,
    open: BinaryHeap<NodeRef>,
    seq: u64,
    state: SearchState,
    path: Vec<Point>,
    expanded: usize,
    // scratch buffers reused between expansions
    dirs: Vec<Direction>,
    successors: Vec<Point>,
}

impl<'g> JumpPointSearch<'g> {
    /// Configure a search from `start` to `goal` on `grid`.
    ///
    /// `cost` orders the open set, `distance` measures the true cost between
    /// jump points and `heuristic` estimates the remaining cost to the goal.
    ///
    /// Fails if either endpoint is outside the grid or on an obstacle.
    pub fn configure(
        grid: &'g Grid,
        start: Point,
        goal: Point,
        cost: impl CostPolicy + 'g,
        distance: impl DistanceMetric + 'g,
        heuristic: impl DistanceMetric + 'g,
    ) -> Result<Self, ConfigError> {
        Self::from_boxed(
            grid,
            start,
            goal,
            Box::new(cost),
            Box::new(distance),
            Box::new(heuristic),
        )
    }

    pub(crate) fn from_boxed(
        grid: &'g Grid,
        start: Point,
        goal: Point,
        cost: Box<dyn CostPolicy + 'g>,
        distance: Box<dyn DistanceMetric + 'g>,
        heuristic: Box<dyn DistanceMetric + 'g>,
    ) -> Result<Self, ConfigError> {
        check_endpoint(grid, Endpoint::Start, start)?;
        check_endpoint(grid, Endpoint::Goal, goal)?;
        if heuristic.overestimates_diagonals() {
            log::warn!("heuristic overestimates diagonal moves; paths may not be optimal");
        }
        log::debug!(
            "jps configured on {}x{} grid: {} -> {}",
            grid.width(),
            grid.height(),
            start,
            goal
        );
        Ok(Self {
            grid,
            start,
            goal,
            cost,
            distance,
            heuristic,
            arena: NodeArena::new(grid),
            open: BinaryHeap::new(),
            seq: 0,
            state: SearchState::Idle,
            path: Vec::new(),
            expanded: 0,
            dirs: Vec::with_capacity(8),
            successors: Vec::with_capacity(8),
        })
    }

    /// Point the engine at a new start/goal pair, keeping its strategies and
    /// reusing its node arena. The engine returns to [`SearchState::Idle`].
    pub fn retarget(&mut self, start: Point, goal: Point) -> Result<(), ConfigError> {
        check_endpoint(self.grid, Endpoint::Start, start)?;
        check_endpoint(self.grid, Endpoint::Goal, goal)?;
        self.start = start;
        self.goal = goal;
        self.restart();
        Ok(())
    }

    /// Discard all transient state and return to [`SearchState::Idle`].
    pub fn restart(&mut self) {
        self.arena.begin_search();
        self.open.clear();
        self.seq = 0;
        self.path.clear();
        self.expanded = 0;
        self.state = SearchState::Idle;
    }

    /// Run a fresh search to completion.
    ///
    /// Returns the jump points from start to goal, excluding the start
    /// itself: consecutive points (and the start and the first point) lie on
    /// a common straight or diagonal line. The path is empty when the goal
    /// is unreachable, and also when `start == goal`.
    pub fn run(&mut self) -> Vec<Point> {
        self.restart();
        while !self.step().is_terminal() {}
        self.path.clone()
    }

    /// Advance the search by one iteration and report the new state.
    ///
    /// The first call on an idle engine seeds the open set with the start.
    /// Callers wanting a bounded search can stop stepping at any time.
    pub fn step(&mut self) -> SearchState {
        match self.state {
            SearchState::Found | SearchState::Exhausted => return self.state,
            SearchState::Idle => {
                self.seed();
                return self.state;
            }
            SearchState::Running => {}
        }

        let Some(cur) = self.open.pop() else {
            log::debug!(
                "jps exhausted after {} expansions: {} unreachable from {}",
                self.expanded,
                self.goal,
                self.start
            );
            self.state = SearchState::Exhausted;
            return self.state;
        };

        let ci = cur.idx;
        let (cp, cur_g, parent) = {
            let node = self.arena.get_or_create_idx(self.grid, ci);
            if node.state != NodeState::Open {
                // Superseded by a cheaper entry pushed on decrease-key.
                return self.state;
            }
            node.state = NodeState::Closed;
            (node.pos, node.g, node.parent)
        };
        self.expanded += 1;

        if cp == self.goal {
            self.path = self.reconstruct(ci);
            self.state = SearchState::Found;
            log::debug!(
                "jps found path to {} with cost {:.3} after {} expansions ({} jump points)",
                self.goal,
                cur_g,
                self.expanded,
                self.path.len()
            );
            return self.state;
        }

        log::trace!("expand {} g={:.3}", cp, cur_g);

        let parent_pos = parent.map(|pi| self.grid.point(pi));
        let mut dirs = std::mem::take(&mut self.dirs);
        let mut successors = std::mem::take(&mut self.successors);
        dirs.clear();
        successors.clear();

        self.pruned_directions(cp, parent_pos, &mut dirs);
        successors.extend(dirs.iter().filter_map(|&dir| self.jump(cp, dir)));

        for &sp in &successors {
            self.relax(ci, cp, cur_g, sp);
        }

        self.dirs = dirs;
        self.successors = successors;
        self.state
    }

    fn seed(&mut self) {
        if self.start == self.goal {
            log::debug!("jps start equals goal {}; nothing to search", self.goal);
            self.state = SearchState::Found;
            return;
        }
        let h = self.heuristic.distance(self.start, self.goal);
        let Some(node) = self.arena.get_or_create(self.grid, self.start) else {
            self.state = SearchState::Exhausted;
            return;
        };
        node.g = 0.0;
        node.h = h;
        node.parent = None;
        node.state = NodeState::Open;
        let score = self.cost.score(node);
        let idx = self.grid.index(self.start).unwrap_or_default();
        self.push(idx, score);
        self.state = SearchState::Running;
    }

    /// Offer successor `sp` reached from the expanded node `ci`.
    fn relax(&mut self, ci: usize, cp: Point, cur_g: f64, sp: Point) {
        let Some(si) = self.grid.index(sp) else {
            return;
        };
        let tentative_g = cur_g + self.distance.distance(cp, sp);
        let node = self.arena.get_or_create_idx(self.grid, si);
        match node.state {
            NodeState::Closed => return,
            NodeState::Open => {
                if tentative_g >= node.g {
                    return;
                }
                node.g = tentative_g;
                node.parent = Some(ci);
            }
            NodeState::New => {
                node.reset();
                node.g = tentative_g;
                node.h = self.heuristic.distance(sp, self.goal);
                node.parent = Some(ci);
                node.state = NodeState::Open;
            }
        }
        let score = self.cost.score(node);
        self.push(si, score);
    }

    #[inline]
    fn push(&mut self, idx: usize, score: f64) {
        self.open.push(NodeRef {
            idx,
            score,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Walk parent links back from `goal_idx`, excluding the start.
    fn reconstruct(&self, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        // A parent chain can never be longer than the number of cells.
        for _ in 0..self.grid.len() {
            let Some(node) = self.arena.get(ci) else {
                break;
            };
            let Some(parent) = node.parent else {
                break;
            };
            path.push(node.pos);
            ci = parent;
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // JPS internals
    // -----------------------------------------------------------------------

    /// Directions worth exploring from `p`, given where the search came from.
    ///
    /// Without a parent every direction is explored. Otherwise only the
    /// natural neighbours (continuing the run, plus both components of a
    /// diagonal run) and the forced neighbours survive.
    fn pruned_directions(&self, p: Point, parent: Option<Point>, dirs: &mut Vec<Direction>) {
        let Some(dir) = parent.and_then(|pp| Direction::between(pp, p)) else {
            dirs.extend(Direction::ALL);
            return;
        };

        if let (Some(h), Some(v)) = (dir.horizontal(), dir.vertical()) {
            for d in [h, v, dir] {
                if self.grid.can_step(p, d) {
                    dirs.push(d);
                }
            }
        } else if self.grid.can_step(p, dir) {
            dirs.push(dir);
        }
        dirs.extend(self.forced_directions(p, dir).into_iter().flatten());
    }

    /// Forced neighbours of `p` when travelling in `dir`.
    ///
    /// A neighbour is forced when the cell beside the run that would
    /// normally offer an equally short detour is blocked, yet the neighbour
    /// itself is reachable from `p`.
    fn forced_directions(&self, p: Point, dir: Direction) -> [Option<Direction>; 2] {
        let (dx, dy) = (dir.dx(), dir.dy());
        // (blocked cell beside the run, step towards the forced neighbour)
        let candidates = if dir.is_diagonal() {
            [
                (Point::new(-dx, 0), Point::new(-dx, dy)),
                (Point::new(0, -dy), Point::new(dx, -dy)),
            ]
        } else if dy == 0 {
            [
                (Point::new(0, 1), Point::new(dx, 1)),
                (Point::new(0, -1), Point::new(dx, -1)),
            ]
        } else {
            [
                (Point::new(1, 0), Point::new(1, dy)),
                (Point::new(-1, 0), Point::new(-1, dy)),
            ]
        };
        candidates.map(|(beside, step)| {
            if self.grid.is_obstacle(p + beside) && self.grid.reachable(p, p + step) {
                Direction::from_offset(step.x, step.y)
            } else {
                None
            }
        })
    }

    #[inline]
    fn has_forced(&self, p: Point, dir: Direction) -> bool {
        self.forced_directions(p, dir).iter().any(Option::is_some)
    }

    /// Jump from `p` along `dir` until a jump point is found or the run is
    /// blocked.
    ///
    /// A straight run never recurses; a diagonal run probes its two
    /// straight components from every cell it crosses, so the recursion is
    /// at most one level deep.
    fn jump(&self, p: Point, dir: Direction) -> Option<Point> {
        let mut cur = p;
        loop {
            let next = cur + dir.offset();
            if !self.grid.reachable(cur, next) {
                return None;
            }
            if next == self.goal || self.has_forced(next, dir) {
                return Some(next);
            }
            if let (Some(h), Some(v)) = (dir.horizontal(), dir.vertical()) {
                if self.jump(next, h).is_some() || self.jump(next, v).is_some() {
                    return Some(next);
                }
            }
            cur = next;
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Jump points found by the last completed search (see [`run`](Self::run)).
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Cost of the path found, measured with the distance metric.
    ///
    /// `Some(0.0)` when `start == goal`, `None` unless the search is in
    /// [`SearchState::Found`].
    pub fn path_cost(&self) -> Option<f64> {
        if self.state != SearchState::Found {
            return None;
        }
        if self.start == self.goal {
            return Some(0.0);
        }
        let gi = self.grid.index(self.goal)?;
        self.arena.get(gi).map(|n| n.g)
    }

    /// Number of nodes expanded by the current search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// The transient node state of the current search.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, pos: Point) -> Result<(), ConfigError> {
    if grid.is_outside(pos) {
        return Err(ConfigError::OutsideGrid {
            endpoint,
            pos,
            bounds: grid.bounds(),
        });
    }
    if grid.is_obstacle(pos) {
        return Err(ConfigError::Blocked { endpoint, pos });
    }
    Ok(())
}
