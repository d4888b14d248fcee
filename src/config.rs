//! Engine configuration
//!
//! Runtime defaults for the engine: initial speed, array generation
//! bounds, grid dimensions, and channel sizing. Configs are plain TOML;
//! the embedding application decides where the file lives. Loading falls
//! back to [`EngineConfig::default`] on any error so a broken file never
//! keeps the engine from starting.

use crate::error::{EngineError, Result, ResultExt};
use crate::step::DEFAULT_SPEED;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Random array generation bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Number of bars a reset produces when no size is given
    pub size: usize,
    /// Smallest bar value
    pub min_value: u32,
    /// Largest bar value
    pub max_value: u32,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: 50,
            min_value: 5,
            max_value: 500,
        }
    }
}

impl ArrayConfig {
    /// Value range with min/max normalized
    pub fn value_range(&self) -> std::ops::RangeInclusive<u32> {
        let lo = self.min_value.min(self.max_value);
        let hi = self.min_value.max(self.max_value);
        lo..=hi
    }
}

/// Grid dimensions and default marker positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: crate::model::GRID_ROWS,
            cols: crate::model::GRID_COLS,
            start: (10, 5),
            end: (10, 29),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial animation speed, 1..=100
    pub speed: u32,
    pub array: ArrayConfig,
    pub grid: GridConfig,
    /// Event channel capacity; notifications beyond it are dropped
    pub event_capacity: usize,
    /// Seed for array generation; `None` seeds from entropy
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            array: ArrayConfig::default(),
            grid: GridConfig::default(),
            event_capacity: 1024,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(EngineError::Io)
            .context(format!("Failed to read config {}", path.display()))?;
        toml::from_str(&text)
            .map_err(|e| EngineError::Config(e.to_string()))
            .context(format!("Failed to parse config {}", path.display()))
    }

    /// Load a config, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Save the config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}
