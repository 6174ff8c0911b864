use crate::error::Result;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlannerConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub towers: TowerConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_coverage_fraction")]
    pub coverage_fraction: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TowerConfig {
    #[serde(default = "default_radius")]
    pub radius: u32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RandomConfig {
    /// Fixed seed for reproducible obstacle scatter; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> i32 { 7 }
fn default_cols() -> i32 { 7 }
fn default_coverage_fraction() -> f64 { 0.3 }
fn default_radius() -> u32 { 2 }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            coverage_fraction: default_coverage_fraction(),
        }
    }
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            towers: TowerConfig::default(),
            random: RandomConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from file, or use defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}; using default configuration", path.display(), e);
                    PlannerConfig::default()
                }
            },
            Err(_) => {
                info!("No {} found, using default configuration", path.display());
                PlannerConfig::default()
            }
        }
    }
}
