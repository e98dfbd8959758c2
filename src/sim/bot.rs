//! Bot steering
//!
//! Bots near the player chase it when they are at least as big and run
//! away otherwise; the difficulty is the probability that a bot makes the
//! sensible choice. Bots outside the player's view wander randomly.

use rand::Rng;

use super::state::EntityRegistry;
use crate::consts::*;
use crate::settings::Viewport;

/// Recompute the vectors of every living bot
pub fn update_bot_vectors<R: Rng + ?Sized>(
    entities: &mut EntityRegistry,
    viewport: Viewport,
    difficulty: f32,
    rng: &mut R,
) {
    let player = entities.player();
    let (p_row, p_col, p_size) = (player.row, player.col, player.size());

    let row_reach = (viewport.rows / 2) as f32 - viewport.rows as f32 * 0.1;
    let col_reach = (viewport.cols / 2) as f32 - viewport.cols as f32 * 0.1;

    for index in PLAYERS..entities.len() {
        let bot = &mut entities[index];
        if !bot.is_alive() {
            continue;
        }

        // Out of the player's view: wander
        if (bot.row - p_row).abs() as f32 > row_reach || (bot.col - p_col).abs() as f32 > col_reach {
            bot.row_vector = rng.random_range(-VERTICAL_MODIFIER..=VERTICAL_MODIFIER);
            bot.col_vector = rng.random_range(-HORIZONTAL_MODIFIER..=HORIZONTAL_MODIFIER);
            continue;
        }

        let toward_row = if bot.row > p_row { -VERTICAL_MODIFIER } else { VERTICAL_MODIFIER };
        let toward_col = if bot.col > p_col { -HORIZONTAL_MODIFIER } else { HORIZONTAL_MODIFIER };

        let chase = if bot.size() >= p_size { 1 } else { -1 };
        let draw = rng.random_range(0..=100) as f32;
        let outcome = if difficulty * 100.0 > draw { chase } else { -chase };

        bot.row_vector = outcome * toward_row;
        bot.col_vector = outcome * toward_col;
    }
}
