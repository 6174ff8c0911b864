#![allow(dead_code)]

use towerplan::pathfinding::Position;
use towerplan::{CellState, Grid};

/// Parse a text layout into a grid plus the marked tower sites.
/// Format:
/// - ■: obstacle
/// - □: free cell
/// - T: free cell marked as a tower site
pub fn parse_layout(layout: &str) -> Result<(Grid, Vec<Position>), String> {
    let lines: Vec<&str> = layout
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err("No non-empty lines found in layout".to_string());
    }

    let cols = lines[0].chars().count() as i32;
    let rows = lines.len() as i32;

    let mut obstacles = Vec::new();
    let mut sites = Vec::new();
    for (y, line) in lines.iter().enumerate() {
        if line.chars().count() as i32 != cols {
            return Err(format!("Row {} has width {}, expected {}", y, line.chars().count(), cols));
        }
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '■' => obstacles.push((y as i32, x as i32)),
                'T' => sites.push(Position::new(x as i32, y as i32)),
                '□' => {}
                other => return Err(format!("Unexpected character '{}' at ({},{})", other, x, y)),
            }
        }
    }

    let grid = Grid::with_obstacles(rows, cols, &obstacles).map_err(|e| e.to_string())?;
    Ok((grid, sites))
}

/// Mirror a layout left-right
pub fn flip_layout_horizontal(layout: &str) -> String {
    layout
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mirror a layout top-bottom
pub fn flip_layout_vertical(layout: &str) -> String {
    let mut lines: Vec<&str> = layout
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    lines.reverse();
    lines.join("\n")
}

/// Layout plus its three mirrored variants
pub fn layout_variants(layout: &str) -> Vec<(&'static str, String)> {
    let h = flip_layout_horizontal(layout);
    let v = flip_layout_vertical(layout);
    let hv = flip_layout_vertical(&h);
    vec![
        ("original", layout.to_string()),
        ("h_flip", h),
        ("v_flip", v),
        ("hv_flip", hv),
    ]
}

/// Visualize grid state and an optional path
pub fn visualize(grid: &Grid, path: &[Position]) -> String {
    let mut result = String::new();
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let pos = Position::new(x, y);
            let symbol = if path.first() == Some(&pos) {
                'S'
            } else if path.last() == Some(&pos) {
                'D'
            } else if path.contains(&pos) {
                '*'
            } else {
                match grid.cell_state(y, x) {
                    Ok(CellState::Obstacle) => '█',
                    Ok(CellState::Tower) => 'T',
                    Ok(CellState::Covered) => '+',
                    _ => '.',
                }
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Snapshot of all cell states in row-major order
pub fn cell_states(grid: &Grid) -> Vec<CellState> {
    let mut states = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            states.push(grid.cell_state(row, col).unwrap());
        }
    }
    states
}
