use crate::error::Result;
use crate::pathfinding::Position;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// Planning operations recorded during a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Tower placed at (x, y)
    PlaceTower { x: i32, y: i32, radius: u32 },
    /// Tower placement rejected (obstacle or out of bounds)
    RejectTower { x: i32, y: i32, radius: u32, reason: String },
    /// Greedy optimizer run and the number of towers it placed
    Optimize { radius: u32, placed: usize },
    /// Path query and the number of towers on the result
    FindPath { start: Position, end: Position, path_len: usize, cached: bool },
    /// Path query rejected before searching (endpoint out of bounds)
    RejectPath { start: Position, end: Position, reason: String },
    /// Greedy optimizer run aborted with an error
    OptimizeFailed { radius: u32, reason: String },
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    /// The action
    pub action: Action,
    /// Whether this is the start or finish of the action
    pub phase: ActionPhase,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    enabled: bool,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            enabled: true,
            actions: Vec::new(),
        }
    }

    /// Logger that drops every action
    pub fn disabled() -> Self {
        ActionLog {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        if !self.enabled {
            return;
        }
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;

        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    /// Log the start of an action
    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    /// Log the finish of an action
    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    /// Get all logged actions
    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.actions)?)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut towers_placed = 0;
        let mut rejected = 0;
        let mut optimizer_runs = 0;
        let mut optimizer_towers = 0;
        let mut optimizer_failures = 0;
        let mut queries = 0;
        let mut cache_hits = 0;
        let mut unreachable = 0;
        let mut rejected_queries = 0;

        // Only count finish events to get actual completed action counts
        for logged in &self.actions {
            if logged.phase != ActionPhase::Finish {
                continue;
            }
            match &logged.action {
                Action::PlaceTower { .. } => towers_placed += 1,
                Action::RejectTower { .. } => rejected += 1,
                Action::Optimize { placed, .. } => {
                    optimizer_runs += 1;
                    optimizer_towers += placed;
                }
                Action::FindPath { path_len, cached, .. } => {
                    queries += 1;
                    if *cached {
                        cache_hits += 1;
                    }
                    if *path_len == 0 {
                        unreachable += 1;
                    }
                }
                Action::RejectPath { .. } => rejected_queries += 1,
                Action::OptimizeFailed { .. } => optimizer_failures += 1,
            }
        }

        let duration = self.actions.last().map(|last| last.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Towers: {} placed, {} rejected\n\
             Optimizer: {} runs, {} towers placed, {} failed\n\
             Path Queries: {} ({} cached, {} unreachable), {} rejected",
            duration,
            self.actions.len(),
            towers_placed,
            rejected,
            optimizer_runs,
            optimizer_towers,
            optimizer_failures,
            queries,
            cache_hits,
            unreachable,
            rejected_queries
        )
    }
}
