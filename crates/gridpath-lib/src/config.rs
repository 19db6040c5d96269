//! Grid configuration.
//!
//! # Environment Variables
//!
//! - `GRIDPATH_SIDE_LENGTH`: grid side length (default: `8`)
//! - `GRIDPATH_COOLDOWN_MS`: per-cell input cooldown in milliseconds (default: `1000`)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Side length used when nothing else is configured.
pub const DEFAULT_SIDE_LENGTH: usize = 8;

/// Minimum delay between two edits of the same cell.
pub const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// Configuration for constructing a grid and its editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// The grid is `side_length` × `side_length`.
    pub side_length: usize,
    /// Edits to a cell changed less than this many milliseconds ago are ignored.
    pub cooldown_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            side_length: DEFAULT_SIDE_LENGTH,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }
}

impl GridConfig {
    pub fn with_side_length(mut self, side_length: usize) -> Self {
        self.side_length = side_length;
        self
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    /// Create configuration from environment variables, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let side_length = std::env::var("GRIDPATH_SIDE_LENGTH")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.side_length);
        let cooldown_ms = std::env::var("GRIDPATH_COOLDOWN_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.cooldown_ms);

        Self {
            side_length,
            cooldown_ms,
        }
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: GridConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a grid.
    pub fn validate(&self) -> Result<()> {
        if self.side_length == 0 {
            return Err(Error::InvalidSideLength {
                side_length: self.side_length,
            });
        }
        Ok(())
    }
}
