//! Error types for tower planning

use thiserror::Error;

/// Invalid grid dimensions or obstacle fraction at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("rows must be at least 1, got {0}")]
    InvalidRows(i32),

    #[error("columns must be at least 1, got {0}")]
    InvalidColumns(i32),

    #[error("coverage fraction must be at least {min}, got {value}")]
    CoverageTooLow { value: f64, min: f64 },

    #[error("coverage fraction must not exceed 1.0, got {0}")]
    CoverageTooHigh(f64),

    #[error("a {rows}x{cols} grid exceeds the maximum of {max} cells")]
    GridTooLarge { rows: i32, cols: i32, max: usize },
}

/// Rejected tower placement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TowerPlacementError {
    #[error("cannot place tower on obstacle at ({x}, {y})")]
    OnObstacle { x: i32, y: i32 },
}

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("cell (row {row}, col {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds { row: i32, col: i32, rows: i32, cols: i32 },

    #[error("tower placement error: {0}")]
    TowerPlacement(#[from] TowerPlacementError),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
