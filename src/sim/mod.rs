//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (by registry index)
//! - No rendering or terminal dependencies

pub mod bot;
pub mod collision;
pub mod grid;
pub mod input;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bot::update_bot_vectors;
pub use collision::{EvalOutcome, eval_positions};
pub use grid::{Cell, Color, WorldGrid};
pub use input::{InputEvent, Key, autopilot_event, update_player_vectors};
pub use motion::{clamp_axis, settle_edges, update_positions};
pub use spawn::{Placement, check_collision, clear_of_entities, spawn_blob, spawn_entity};
pub use state::{Entity, EntityRegistry, GamePhase, GameState, Outcome};
pub use tick::{TickInput, tick};
