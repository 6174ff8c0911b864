pub mod action_log;
pub mod config;
pub mod coverage;
pub mod error;
pub mod grid;
pub mod optimizer;
pub mod pathfinding;
pub mod random;
pub mod session;
pub mod snapshot;

pub use config::PlannerConfig;
pub use coverage::{place_tower, Tower};
pub use error::{ConfigurationError, PlanError, Result, TowerPlacementError};
pub use grid::{CellState, Grid};
pub use optimizer::{optimize, Placement};
pub use pathfinding::{neighbors, PathFinder, Position};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use session::PlanningSession;
pub use snapshot::GridSnapshot;
