use serde::{Deserialize, Serialize};

use crate::error::GoError;

pub const MAX_SIZE: u8 = 25;
pub const MAX_KOMI: f64 = 15.0;
pub const DEFAULT_KOMI: f64 = 3.75;

/// Fixed parameters of a game, supplied by the host at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: u8,
    pub komi: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: 19,
            komi: DEFAULT_KOMI,
        }
    }
}

impl GameConfig {
    pub fn new(size: u8, komi: f64) -> Self {
        GameConfig { size, komi }
    }

    pub fn validate(&self) -> Result<(), GoError> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(GoError::InvalidBoardSize);
        }
        validate_komi(self.komi)
    }
}

pub fn validate_komi(komi: f64) -> Result<(), GoError> {
    if komi.is_finite() && (0.0..=MAX_KOMI).contains(&komi) {
        Ok(())
    } else {
        Err(GoError::InvalidKomi)
    }
}
