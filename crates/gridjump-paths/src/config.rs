use gridjump_core::{Grid, Point};

use crate::cost::Cost;
use crate::distance::Metric;
use crate::error::ConfigError;
use crate::jps::JumpPointSearch;
use crate::traits::{CostPolicy, DistanceMetric};

/// Strategy selection for a search, loadable from a config file.
///
/// The default is an optimal A* ordering with octile distance as both the
/// edge cost and the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub cost: Cost,
    pub distance: Metric,
    pub heuristic: Metric,
}

impl SearchConfig {
    /// Configure a search with these strategies.
    pub fn build<'g>(
        &self,
        grid: &'g Grid,
        start: Point,
        goal: Point,
    ) -> Result<JumpPointSearch<'g>, ConfigError> {
        JumpPointSearch::configure(grid, start, goal, self.cost, self.distance, self.heuristic)
    }
}

/// Step-by-step construction of a [`JumpPointSearch`].
///
/// Every part must be supplied; [`build`](Self::build) reports the first
/// missing one.
pub struct SearchBuilder<'g> {
    grid: &'g Grid,
    start: Option<Point>,
    goal: Option<Point>,
    cost: Option<Box<dyn CostPolicy + 'g>>,
    distance: Option<Box<dyn DistanceMetric + 'g>>,
    heuristic: Option<Box<dyn DistanceMetric + 'g>>,
}

impl<'g> SearchBuilder<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            start: None,
            goal: None,
            cost: None,
            distance: None,
            heuristic: None,
        }
    }

    pub fn start(mut self, p: Point) -> Self {
        self.start = Some(p);
        self
    }

    pub fn goal(mut self, p: Point) -> Self {
        self.goal = Some(p);
        self
    }

    pub fn cost_policy(mut self, cost: impl CostPolicy + 'g) -> Self {
        self.cost = Some(Box::new(cost));
        self
    }

    pub fn distance_metric(mut self, distance: impl DistanceMetric + 'g) -> Self {
        self.distance = Some(Box::new(distance));
        self
    }

    pub fn heuristic(mut self, heuristic: impl DistanceMetric + 'g) -> Self {
        self.heuristic = Some(Box::new(heuristic));
        self
    }

    /// Fill every strategy from `config`.
    pub fn config(self, config: &SearchConfig) -> Self {
        self.cost_policy(config.cost)
            .distance_metric(config.distance)
            .heuristic(config.heuristic)
    }

    pub fn build(self) -> Result<JumpPointSearch<'g>, ConfigError> {
        JumpPointSearch::from_boxed(
            self.grid,
            self.start.ok_or(ConfigError::Missing("start point"))?,
            self.goal.ok_or(ConfigError::Missing("goal point"))?,
            self.cost.ok_or(ConfigError::Missing("cost policy"))?,
            self.distance.ok_or(ConfigError::Missing("distance metric"))?,
            self.heuristic.ok_or(ConfigError::Missing("heuristic"))?,
        )
    }
}
