use crate::action_log::{Action, ActionLog};
use crate::config::PlannerConfig;
use crate::coverage::{place_tower, Tower};
use crate::error::Result;
use crate::grid::Grid;
use crate::optimizer::{optimize, Placement};
use crate::pathfinding::{neighbors, PathFinder, Position};
use crate::random::{RandomSource, RngSource};
use log::{info, warn};

/// One planning session: the exclusively-owned grid, its path cache and
/// the action log. Operations are serialized through `&mut self`.
pub struct PlanningSession {
    grid: Grid,
    finder: PathFinder,
    log: ActionLog,
    /// Where `save_action_log` writes; set for sessions built from a config
    action_log_path: Option<String>,
}

impl PlanningSession {
    pub fn new(grid: Grid) -> Self {
        PlanningSession {
            grid,
            finder: PathFinder::new(),
            log: ActionLog::new(),
            action_log_path: None,
        }
    }

    /// Build the grid described by `config`, scattering obstacles from `source`
    pub fn from_config<S: RandomSource + ?Sized>(config: &PlannerConfig, source: &mut S) -> Result<Self> {
        let grid = Grid::new(
            config.grid.rows,
            config.grid.cols,
            config.grid.coverage_fraction,
            source,
        )?;
        let mut session = Self::new(grid);
        if config.logging.enable_action_log {
            session.action_log_path = Some(config.logging.action_log_path.clone());
        } else {
            session.log = ActionLog::disabled();
        }
        Ok(session)
    }

    /// Like [`from_config`](Self::from_config) with the configured seed, or entropy
    pub fn from_config_seeded(config: &PlannerConfig) -> Result<Self> {
        match config.random.seed {
            Some(seed) => Self::from_config(config, &mut RngSource::seeded(seed)),
            None => Self::from_config(config, &mut RngSource::from_entropy()),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Write the action log as JSON to the configured path.
    ///
    /// Returns the path written, or `None` when the session has no configured
    /// path (built with `new`, or action logging disabled).
    pub fn save_action_log(&self) -> Result<Option<&str>> {
        let Some(path) = self.action_log_path.as_deref() else {
            return Ok(None);
        };
        self.log.save_to_file(path)?;
        info!("Saved {} logged actions to {}", self.log.actions().len(), path);
        Ok(Some(path))
    }

    pub fn path_finder(&self) -> &PathFinder {
        &self.finder
    }

    pub fn place_tower(&mut self, x: i32, y: i32, radius: u32) -> Result<Tower> {
        let action = Action::PlaceTower { x, y, radius };
        self.log.log_start(action.clone());
        match place_tower(&mut self.grid, x, y, radius) {
            Ok(tower) => {
                self.log.log_finish(action);
                Ok(tower)
            }
            Err(e) => {
                warn!("Rejected tower at ({},{}): {}", x, y, e);
                self.log.log_finish(Action::RejectTower {
                    x,
                    y,
                    radius,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn optimize(&mut self, radius: u32) -> Result<Vec<Placement>> {
        self.log.log_start(Action::Optimize { radius, placed: 0 });
        match optimize(&mut self.grid, radius) {
            Ok(placements) => {
                self.log.log_finish(Action::Optimize {
                    radius,
                    placed: placements.len(),
                });
                Ok(placements)
            }
            Err(e) => {
                warn!("Optimizer failed with radius {}: {}", radius, e);
                self.log.log_finish(Action::OptimizeFailed {
                    radius,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn neighbors(&self, point: Position) -> Vec<Position> {
        neighbors(&self.grid, point)
    }

    pub fn find_path(&mut self, start: Position, end: Position) -> Result<Vec<Position>> {
        let cached = self.finder.is_cached(start, end);
        self.log.log_start(Action::FindPath {
            start,
            end,
            path_len: 0,
            cached,
        });
        let path = match self.finder.find_path(&self.grid, start, end) {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Rejected path query ({},{}) -> ({},{}): {}",
                    start.x, start.y, end.x, end.y, e
                );
                self.log.log_finish(Action::RejectPath {
                    start,
                    end,
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };
        // A stale entry is dropped inside find_path, so re-check after the query
        let cached = cached && self.finder.is_cached(start, end);
        self.log.log_finish(Action::FindPath {
            start,
            end,
            path_len: path.len(),
            cached,
        });
        Ok(path)
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
