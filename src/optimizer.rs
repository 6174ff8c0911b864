use crate::coverage::{coverage_footprint, is_covered_by_tower, place_tower};
use crate::error::Result;
use crate::grid::{CellState, Grid};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A tower placement chosen by the optimizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
}

/// Greedily place towers of `radius` until no candidate improves coverage.
///
/// Candidates are the cells that are `Empty` when the run starts, in row-major
/// order. Each round scores every remaining candidate by its gross footprint
/// (non-obstacle cells in the square neighborhood, already-covered cells
/// included) and places a tower on the first strict maximum. Afterwards every
/// candidate within `radius` of any tower is dropped. Scoring is not marginal
/// gain; only the pruning step looks at existing coverage.
pub fn optimize(grid: &mut Grid, radius: u32) -> Result<Vec<Placement>> {
    let mut candidates: Vec<(i32, i32)> = grid
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, state)| **state == CellState::Empty)
        .map(|(id, _)| grid.get_coords(id))
        .collect();

    debug!("[optimize] radius {} with {} candidate cells", radius, candidates.len());

    let mut placements = Vec::new();
    loop {
        let mut best: Option<(i32, i32)> = None;
        let mut best_score = 0;
        for &(x, y) in &candidates {
            let score = coverage_footprint(grid, x, y, radius);
            if score > best_score {
                best_score = score;
                best = Some((x, y));
            }
        }

        let Some((x, y)) = best else {
            break;
        };

        place_tower(grid, x, y, radius)?;
        placements.push(Placement { x, y, radius });

        let before = candidates.len();
        candidates.retain(|&(cx, cy)| !is_covered_by_tower(grid, cx, cy, radius));
        debug!(
            "[optimize] step {}: tower at ({},{}) footprint {}, pruned {} candidates, {} left",
            placements.len(),
            x,
            y,
            best_score,
            before - candidates.len(),
            candidates.len()
        );
    }

    info!(
        "[optimize] placed {} towers, {} cells still empty",
        placements.len(),
        grid.count_cells(CellState::Empty)
    );
    Ok(placements)
}
