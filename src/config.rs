//! Session configuration
//!
//! World size and bot count are checked before any state is built; an
//! out-of-range value never produces a partial world.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::consts::*;

/// Errors raised before a session can start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Incorrect size of the world ({size}). Should be in range {min} to {max}.")]
    WorldSize { size: usize, min: usize, max: usize },
    #[error("Incorrect number of bots ({count}). Should be in range {min} to {max}.")]
    BotCount { count: usize, min: usize, max: usize },
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings format: {0}")]
    Json(#[from] serde_json::Error),
}

pub const WORLD_SIZE_RANGE: RangeInclusive<usize> = MIN_WORLD_SIZE..=MAX_WORLD_SIZE;
pub const BOT_COUNT_RANGE: RangeInclusive<usize> = MIN_BOT_COUNT..=MAX_BOT_COUNT;

/// Validated world parameters for one or more sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub world_size: usize,
    pub bot_count: usize,
}

impl GameConfig {
    pub fn new(world_size: usize, bot_count: usize) -> Result<Self, ConfigError> {
        if !WORLD_SIZE_RANGE.contains(&world_size) {
            return Err(ConfigError::WorldSize {
                size: world_size,
                min: MIN_WORLD_SIZE,
                max: MAX_WORLD_SIZE,
            });
        }
        if !BOT_COUNT_RANGE.contains(&bot_count) {
            return Err(ConfigError::BotCount {
                count: bot_count,
                min: MIN_BOT_COUNT,
                max: MAX_BOT_COUNT,
            });
        }
        Ok(Self {
            world_size,
            bot_count,
        })
    }

    /// Registry capacity: player slots plus bots
    pub fn entity_count(&self) -> usize {
        PLAYERS + self.bot_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_range_edges() {
        assert!(GameConfig::new(100, 0).is_ok());
        assert!(GameConfig::new(1200, 1000).is_ok());
        assert_eq!(GameConfig::new(500, 10).unwrap().entity_count(), 11);
    }

    #[test]
    fn test_rejects_small_world() {
        let err = GameConfig::new(50, 1).unwrap_err();
        assert!(matches!(err, ConfigError::WorldSize { size: 50, .. }));
        assert_eq!(
            err.to_string(),
            "Incorrect size of the world (50). Should be in range 100 to 1200."
        );
    }

    #[test]
    fn test_rejects_too_many_bots() {
        let err = GameConfig::new(100, 1001).unwrap_err();
        assert!(matches!(err, ConfigError::BotCount { count: 1001, .. }));
        assert!(err.to_string().contains("0 to 1000"));
    }
}
