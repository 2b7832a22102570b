use core::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not parse round configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Pacing of the loss sequence. Cosmetic only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossTiming {
    pub mine_reveal_delay_ms: u32,
}

impl LossTiming {
    pub const DEFAULT_MINE_REVEAL_DELAY_MS: u32 = 20;

    pub const fn mine_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.mine_reveal_delay_ms as u64)
    }
}

impl Default for LossTiming {
    fn default() -> Self {
        Self {
            mine_reveal_delay_ms: Self::DEFAULT_MINE_REVEAL_DELAY_MS,
        }
    }
}

/// Everything the host picks before a round starts.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub mode: GameMode,
    /// Forwarded to the renderer untouched, in the host's own unit.
    pub cell_size: f32,
    pub timing: LossTiming,
}

impl RoundConfig {
    pub const DEFAULT_CELL_SIZE: f32 = 2.0;

    pub fn new(mode: GameMode, cell_size: f32) -> Result<Self> {
        let config = Self {
            mode,
            cell_size,
            timing: LossTiming::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from the menu's mode index.
    pub fn from_mode_index(index: usize, cell_size: f32) -> Result<Self> {
        Self::new(GameMode::from_index(index)?, cell_size)
    }

    pub fn from_json(json: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GameError::InvalidCellSize);
        }
        self.mode.board_spec().validate()
    }

    pub fn board_spec(&self) -> BoardSpec {
        self.mode.board_spec()
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            cell_size: Self::DEFAULT_CELL_SIZE,
            timing: LossTiming::default(),
        }
    }
}
