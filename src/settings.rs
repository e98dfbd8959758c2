//! Game settings and difficulty presets
//!
//! Settings are optional: a JSON file may override any field, anything
//! missing or unreadable falls back to the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::*;

/// Bot difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Probability that a nearby bot chases when bigger / flees when smaller
    pub fn chase_probability(&self) -> f32 {
        match self {
            Difficulty::Easy => BOT_EASY,
            Difficulty::Medium => BOT_MEDIUM,
            Difficulty::Hard => BOT_HARD,
        }
    }
}

/// Visible window onto the world (terminal lines x columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub rows: i32,
    pub cols: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            rows: VIEWPORT_ROWS,
            cols: VIEWPORT_COLS,
        }
    }
}

/// Tick timing and update cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    /// Milliseconds between ticks
    pub tick_rate_ms: u64,
    /// Ticks between blob spawns
    pub blob_update_rate: u64,
    /// Ticks between bot direction updates
    pub vector_update_rate: u64,
    /// Seconds the final frame stays up after a win/loss
    pub end_delay_secs: u64,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            tick_rate_ms: TICK_RATE_MS,
            blob_update_rate: BLOB_UPDATE_RATE,
            vector_update_rate: VECTOR_UPDATE_RATE,
            end_delay_secs: END_DELAY_SECS,
        }
    }
}

impl Cadence {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Length of the end-of-game countdown in ticks
    pub fn end_delay_ticks(&self) -> u32 {
        (self.end_delay_secs * 1000 / self.tick_rate_ms.max(1)) as u32
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Difficulty offered by default in the start menu
    pub difficulty: Difficulty,
    pub viewport: Viewport,
    pub cadence: Cadence,
}

impl Settings {
    /// Parse settings from JSON and check them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.cadence;
        if c.tick_rate_ms == 0 || c.blob_update_rate == 0 || c.vector_update_rate == 0 {
            return Err(ConfigError::InvalidSetting(
                "tick rate and update rates must be positive".to_string(),
            ));
        }
        if self.viewport.rows < 3 || self.viewport.cols < 3 {
            return Err(ConfigError::InvalidSetting(format!(
                "viewport {}x{} is smaller than 3x3",
                self.viewport.rows, self.viewport.cols
            )));
        }
        Ok(())
    }
}
