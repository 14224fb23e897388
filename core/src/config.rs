// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-engine configuration

use crate::{GameError, Result, DEFAULT_SIZE, WIN_LENGTH};
use serde::{Deserialize, Serialize};

/// Reward the second mover gets for a draw in the default shaping
pub const DEFAULT_DRAW_REWARD: f32 = 0.01;

/// Board shape and reward shaping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Terminal value of a draw for the second mover (the first mover gets 0)
    pub draw_reward: f32,
    /// Let the template layer feed the heuristic move masks
    pub setup_templates: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_SIZE,
            width: DEFAULT_SIZE,
            draw_reward: DEFAULT_DRAW_REWARD,
            setup_templates: false,
        }
    }
}

impl GameConfig {
    /// Square board of the given size, default shaping
    pub fn square(size: usize) -> Self {
        Self {
            height: size,
            width: size,
            ..Self::default()
        }
    }

    /// Variant where a draw counts as a loss for the second mover
    pub fn penalised_draw() -> Self {
        Self {
            draw_reward: -1.0,
            ..Self::default()
        }
    }

    /// Load from JSON; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject shapes and rewards the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.height < WIN_LENGTH || self.width < WIN_LENGTH {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} is smaller than a winning line of {}",
                self.height, self.width, WIN_LENGTH
            )));
        }
        if self.height != self.width {
            return Err(GameError::InvalidConfig(format!(
                "action space is width squared, board must be square (got {}x{})",
                self.height, self.width
            )));
        }
        if !self.draw_reward.is_finite() {
            return Err(GameError::InvalidConfig(format!(
                "draw reward {} is not finite",
                self.draw_reward
            )));
        }
        Ok(())
    }
}
