//! Simulation settings, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFAULT_EARSHOT, DEFAULT_HEIGHT, DEFAULT_LAYERS, DEFAULT_TURN_DELAY, DEFAULT_WIDTH,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for building a world and its starting population.
///
/// Every field has a default, so a config file only needs the fields it
/// wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub layers: i32,
    /// Base per-action cost given to spawned actors.
    pub turn_delay: f64,
    /// How far wanderers react to sounds, in tiles.
    pub earshot: i32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            layers: DEFAULT_LAYERS,
            turn_delay: DEFAULT_TURN_DELAY,
            earshot: DEFAULT_EARSHOT,
            seed: 1,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings describe a usable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        if self.layers < 1 {
            return Err(ConfigError::Invalid(format!(
                "need at least one layer, got {}",
                self.layers
            )));
        }
        // Written this way round so NaN fails too.
        if !(self.turn_delay > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "turn_delay must be positive, got {}",
                self.turn_delay
            )));
        }
        if self.earshot < 0 {
            return Err(ConfigError::Invalid(format!(
                "earshot cannot be negative, got {}",
                self.earshot
            )));
        }
        Ok(())
    }
}
