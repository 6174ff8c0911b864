use crate::error::{Result, TowerPlacementError};
use crate::grid::{CellState, Grid};
use crate::pathfinding::Position;
use log::debug;
use serde::{Deserialize, Serialize};

/// A placed signal tower. Never mutated or removed once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tower {
    /// Column (x) and row (y) of the tower cell
    pub position: Position,
    pub radius: u32,
}

impl Tower {
    pub fn new(x: i32, y: i32, radius: u32) -> Self {
        Tower {
            position: Position::new(x, y),
            radius,
        }
    }
}

/// Place a tower at column `x`, row `y` and mark its square neighborhood covered.
///
/// Validation happens before any mutation, so a rejected placement leaves the
/// grid untouched. Neighborhood cells outside the grid are skipped.
pub fn place_tower(grid: &mut Grid, x: i32, y: i32, radius: u32) -> Result<Tower> {
    grid.check_bounds(y, x)?;
    if grid.is_obstacle(y, x) {
        return Err(TowerPlacementError::OnObstacle { x, y }.into());
    }

    grid.set_cell(x, y, CellState::Tower);
    let tower = Tower::new(x, y, radius);
    grid.push_tower(tower);

    let (xs, ys) = grid.clipped_square(x, y, radius);
    let mut newly_covered = 0;
    for j in ys {
        for i in xs.clone() {
            if grid.state_at(i, j) == Some(CellState::Empty) && grid.set_cell(i, j, CellState::Covered) {
                newly_covered += 1;
            }
        }
    }

    debug!(
        "[place_tower] tower at ({},{}) radius {} covered {} new cells",
        x, y, radius, newly_covered
    );
    Ok(tower)
}

/// Gross footprint of a candidate: non-obstacle cells inside the square
/// neighborhood, including cells already covered or holding towers.
pub fn coverage_footprint(grid: &Grid, x: i32, y: i32, radius: u32) -> usize {
    let (xs, ys) = grid.clipped_square(x, y, radius);
    let mut count = 0;
    for j in ys {
        for i in xs.clone() {
            match grid.state_at(i, j) {
                Some(CellState::Obstacle) | None => {}
                Some(_) => count += 1,
            }
        }
    }
    count
}

/// True when some tower cell lies within Chebyshev distance `radius` of (x, y)
pub fn is_covered_by_tower(grid: &Grid, x: i32, y: i32, radius: u32) -> bool {
    let (xs, ys) = grid.clipped_square(x, y, radius);
    for j in ys {
        for i in xs.clone() {
            if grid.state_at(i, j) == Some(CellState::Tower) {
                return true;
            }
        }
    }
    false
}
