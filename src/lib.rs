//! Agar.io - A terminal arcade game of growing circles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world grid, entities, spawning, bots, collisions)
//! - `game`: Fixed tick-rate game loop and session state machine
//! - `renderer`: Logical draw primitives and a plain-text rasterizer
//! - `platform`: Input, menu and name-source collaborators
//! - `settings` / `config`: Difficulty presets, timing, command-line limits

pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::Game;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World size limits (cells per side)
    pub const MIN_WORLD_SIZE: usize = 100;
    pub const MAX_WORLD_SIZE: usize = 1200;
    /// Bot count limits
    pub const MIN_BOT_COUNT: usize = 0;
    pub const MAX_BOT_COUNT: usize = 1000;

    /// Player slots at the front of the registry (only one is supported)
    pub const PLAYERS: usize = 1;
    /// Registry index of the player
    pub const PLAYER: usize = 0;

    /// Placement trials before the spawner gives up (world is probably full)
    pub const TRIES: u32 = 2;
    /// Blob cap = world size / ratio + 1
    pub const BLOB_MAX_RATIO: usize = 2;
    pub const BLOB_RADIUS: i32 = 0;

    /// Movement speed per tick along columns and rows
    pub const HORIZONTAL_MODIFIER: i32 = 2;
    pub const VERTICAL_MODIFIER: i32 = 1;

    /// Random starting radius range of a player/bot
    pub const MIN_BASE_RADIUS: i32 = 2;
    pub const MAX_BASE_RADIUS: i32 = 6;
    /// Circles look better with .5 radii
    pub const RADIUS_MODIFIER: f32 = 0.5;
    /// Blobs needed to grow the radius by 1
    pub const SIZE_MODIFIER: u32 = 10;
    /// Share of a consumed entity's size gained by the consumer
    pub const GROW_MODIFIER: f32 = 0.5;

    /// Chase probability per difficulty preset
    pub const BOT_EASY: f32 = 0.3;
    pub const BOT_MEDIUM: f32 = 0.7;
    pub const BOT_HARD: f32 = 0.98;

    /// Milliseconds between game updates
    pub const TICK_RATE_MS: u64 = 60;
    /// Ticks between blob spawns
    pub const BLOB_UPDATE_RATE: u64 = 20;
    /// Ticks between bot direction updates
    pub const VECTOR_UPDATE_RATE: u64 = 5;
    /// Seconds the final frame stays up after a win/loss
    pub const END_DELAY_SECS: u64 = 2;

    /// Name length bounds (characters)
    pub const MAX_NICKNAME_LEN: usize = 10;
    pub const MAX_NAME_LEN: usize = 16;

    /// Default viewport (terminal lines x columns)
    pub const VIEWPORT_ROWS: i32 = 40;
    pub const VIEWPORT_COLS: i32 = 120;
}

/// Euclidean length of a (row, col) offset
#[inline]
pub fn distance(d_row: i32, d_col: i32) -> f32 {
    Vec2::new(d_col as f32, d_row as f32).length()
}

/// Whether `(row, col)` lies within `radius` of the circle center
#[inline]
pub fn inside_circle(row: i32, col: i32, center_row: i32, center_col: i32, radius: f32) -> bool {
    distance(center_row - row, center_col - col) <= radius
}

/// Collision/display radius for an entity of the given size.
///
/// The size is divided in whole steps, so radii are always `k + 0.5`.
#[inline]
pub fn radius_for_size(size: u32) -> f32 {
    (size / consts::SIZE_MODIFIER) as f32 + consts::RADIUS_MODIFIER
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(0, 0), 0.0);
        assert!((distance(3, 4) - 5.0).abs() < 1e-6);
        assert!((distance(-3, 4) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_inside_circle() {
        assert!(inside_circle(10, 10, 10, 10, 0.0));
        assert!(inside_circle(12, 10, 10, 10, 2.5));
        assert!(!inside_circle(13, 10, 10, 10, 2.5));
        assert!(!inside_circle(12, 12, 10, 10, 2.5));
    }

    #[test]
    fn test_radius_steps() {
        assert_eq!(radius_for_size(0), 0.5);
        assert_eq!(radius_for_size(9), 0.5);
        assert_eq!(radius_for_size(10), 1.5);
        assert_eq!(radius_for_size(50), 5.5);
        assert_eq!(radius_for_size(52), 5.5);
    }

    proptest! {
        #[test]
        fn radius_is_monotonic(a in 0u32..100_000, b in 0u32..100_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(radius_for_size(lo) <= radius_for_size(hi));
            prop_assert!(radius_for_size(lo) >= consts::RADIUS_MODIFIER);
        }
    }
}
