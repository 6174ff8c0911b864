//! Read-only views of the grid for rendering and debugging

use crate::coverage::Tower;
use crate::error::Result;
use crate::grid::{CellState, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;

impl CellState {
    /// Three-valued encoding used by renderers: 0 empty, 1 tower or covered, -1 obstacle
    pub fn encode(self) -> i32 {
        match self {
            CellState::Empty => 0,
            CellState::Tower | CellState::Covered => 1,
            CellState::Obstacle => -1,
        }
    }

    /// Token used in the textual dump
    pub fn token(self) -> &'static str {
        match self {
            CellState::Empty => "-",
            CellState::Obstacle => "block",
            CellState::Tower => "Tower",
            CellState::Covered => "т",
        }
    }
}

impl Grid {
    /// Row-major matrix of encoded cell states
    pub fn export_cell_grid(&self) -> Vec<Vec<i32>> {
        self.cells()
            .chunks(self.cols() as usize)
            .map(|row| row.iter().map(|state| state.encode()).collect())
            .collect()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows(),
            cols: self.cols(),
            revision: self.revision(),
            cells: self.export_cell_grid(),
            towers: self.towers().to_vec(),
        }
    }
}

/// One row per line, cells separated by tabs
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells().chunks(self.cols() as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<&str> = row.iter().map(|state| state.token()).collect();
            write!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

/// Serializable copy of the grid handed to visualization tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: i32,
    pub cols: i32,
    pub revision: u64,
    pub cells: Vec<Vec<i32>>,
    pub towers: Vec<Tower>,
}

impl GridSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
