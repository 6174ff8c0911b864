use crate::coverage::Tower;
use crate::error::{ConfigurationError, PlanError, Result};
use crate::random::RandomSource;
use log::debug;
use std::ops::RangeInclusive;

/// Smallest accepted obstacle fraction
pub const MIN_COVERAGE_FRACTION: f64 = 0.3;

/// Largest accepted cell count; cell indices must fit in an `i32`
pub const MAX_CELLS: usize = i32::MAX as usize;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Obstacle,
    Tower,
    Covered,
}

/// City grid storing cell states, obstacles and placed towers.
///
/// Cells are stored row-major; `x` is the column and `y` the row. `Obstacle`
/// and `Tower` are terminal: once set, a cell never changes again.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cols: i32,
    coverage_fraction: f64,
    cells: Vec<CellState>,
    towers: Vec<Tower>,
    /// Revision number - incremented whenever grid cells change
    revision: u64,
}

impl Grid {
    /// Build a grid and scatter `⌊rows·cols·coverage_fraction⌋` distinct obstacles
    /// using samples drawn from `source`.
    ///
    /// Dimensions and fraction are validated before anything is allocated.
    pub fn new<S: RandomSource + ?Sized>(
        rows: i32,
        cols: i32,
        coverage_fraction: f64,
        source: &mut S,
    ) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        validate_coverage(coverage_fraction)?;

        let mut grid = Self::empty(rows, cols, coverage_fraction);
        let target = obstacle_target(rows, cols, coverage_fraction);

        let mut placed = 0;
        let mut samples = 0u64;
        while placed < target {
            let y = source.next_int(0, rows - 1);
            let x = source.next_int(0, cols - 1);
            samples += 1;
            // Duplicate samples are retried, not double-counted
            if grid.mark_obstacle(x, y) {
                placed += 1;
            }
        }

        debug!(
            "[Grid] scattered {} obstacles on {}x{} grid ({} samples)",
            placed, rows, cols, samples
        );
        Ok(grid)
    }

    /// Validated grid with no obstacles
    pub fn open(rows: i32, cols: i32) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        Ok(Self::empty(rows, cols, 0.0))
    }

    /// Validated grid with specific obstacle cells given as `(row, col)`.
    /// Entries outside the grid are ignored.
    pub fn with_obstacles(rows: i32, cols: i32, obstacles: &[(i32, i32)]) -> Result<Self> {
        let mut grid = Self::open(rows, cols)?;
        for &(row, col) in obstacles {
            grid.mark_obstacle(col, row);
        }
        grid.coverage_fraction = grid.obstacle_count() as f64 / (rows as f64 * cols as f64);
        Ok(grid)
    }

    fn empty(rows: i32, cols: i32, coverage_fraction: f64) -> Self {
        Grid {
            rows,
            cols,
            coverage_fraction,
            cells: vec![CellState::Empty; rows as usize * cols as usize],
            towers: Vec::new(),
            revision: 0,
        }
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Obstacle fraction the grid was built with
    pub fn coverage_fraction(&self) -> f64 {
        self.coverage_fraction
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    /// State of the cell at `(row, col)`
    pub fn cell_state(&self, row: i32, col: i32) -> Result<CellState> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.get_id(col, row)])
    }

    /// Out-of-bounds cells are not part of the obstacle set
    pub fn is_obstacle(&self, row: i32, col: i32) -> bool {
        self.state_at(col, row) == Some(CellState::Obstacle)
    }

    /// Fail with `OutOfBounds` unless `(row, col)` lies inside the grid
    pub fn check_bounds(&self, row: i32, col: i32) -> Result<()> {
        if self.in_bounds(row, col) {
            Ok(())
        } else {
            Err(PlanError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Towers in placement order
    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    pub fn obstacle_count(&self) -> usize {
        self.count_cells(CellState::Obstacle)
    }

    pub fn count_cells(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Convert (x, y) coordinates to cell index
    pub(crate) fn get_id(&self, x: i32, y: i32) -> usize {
        x as usize + y as usize * self.cols as usize
    }

    /// Convert cell index to (x, y) coordinates
    pub(crate) fn get_coords(&self, id: usize) -> (i32, i32) {
        let cols = self.cols as usize;
        ((id % cols) as i32, (id / cols) as i32)
    }

    /// Column and row ranges of the square of `radius` around (x, y),
    /// clipped to the grid. Either range is empty when the square misses it.
    pub(crate) fn clipped_square(&self, x: i32, y: i32, radius: u32) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        let clip = |center: i32, len: i32| {
            let lo = (center as i64 - radius as i64).max(0);
            let hi = (center as i64 + radius as i64).min(len as i64 - 1);
            if lo > hi {
                // Canonical empty range
                1..=0
            } else {
                lo as i32..=hi as i32
            }
        };
        (clip(x, self.cols), clip(y, self.rows))
    }

    /// Cell state at column `x`, row `y`, or `None` outside the grid
    pub(crate) fn state_at(&self, x: i32, y: i32) -> Option<CellState> {
        if self.in_bounds(y, x) {
            Some(self.cells[self.get_id(x, y)])
        } else {
            None
        }
    }

    pub(crate) fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Set cell value at (x, y). Terminal states are never overwritten.
    pub(crate) fn set_cell(&mut self, x: i32, y: i32, value: CellState) -> bool {
        if !self.in_bounds(y, x) {
            return false;
        }
        let id = self.get_id(x, y);
        let old_value = self.cells[id];
        if old_value == value || matches!(old_value, CellState::Obstacle | CellState::Tower) {
            return false;
        }
        self.cells[id] = value;
        self.revision += 1;
        true
    }

    pub(crate) fn push_tower(&mut self, tower: Tower) {
        self.towers.push(tower);
        self.revision += 1;
    }

    fn mark_obstacle(&mut self, x: i32, y: i32) -> bool {
        self.set_cell(x, y, CellState::Obstacle)
    }
}

fn validate_dimensions(rows: i32, cols: i32) -> std::result::Result<(), ConfigurationError> {
    if rows < 1 {
        return Err(ConfigurationError::InvalidRows(rows));
    }
    if cols < 1 {
        return Err(ConfigurationError::InvalidColumns(cols));
    }
    match (rows as usize).checked_mul(cols as usize) {
        Some(cells) if cells <= MAX_CELLS => Ok(()),
        _ => Err(ConfigurationError::GridTooLarge {
            rows,
            cols,
            max: MAX_CELLS,
        }),
    }
}

fn validate_coverage(coverage_fraction: f64) -> std::result::Result<(), ConfigurationError> {
    // Written so NaN fails the lower-bound check
    if !(coverage_fraction >= MIN_COVERAGE_FRACTION) {
        return Err(ConfigurationError::CoverageTooLow {
            value: coverage_fraction,
            min: MIN_COVERAGE_FRACTION,
        });
    }
    if coverage_fraction > 1.0 {
        return Err(ConfigurationError::CoverageTooHigh(coverage_fraction));
    }
    Ok(())
}

/// Number of distinct obstacle cells a grid of this shape receives
pub fn obstacle_target(rows: i32, cols: i32, coverage_fraction: f64) -> usize {
    (rows as f64 * cols as f64 * coverage_fraction).floor() as usize
}
