//! Player input mapping
//!
//! Input never steers relative to the current heading: a pointer event picks
//! one of 8 absolute directions (or a stop) from the 3x3 region of the
//! viewport it lands in, and arrow keys pick one of 4.

use super::state::GameState;
use crate::consts::*;
use crate::settings::Viewport;

/// Discrete keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Halt the player
    Stop,
    /// Pause / open the menu
    Menu,
    Char(char),
}

/// One raw input event; at most one is consumed per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Pointer position in viewport coordinates
    Pointer { row: i32, col: i32 },
}

/// New `(row_vector, col_vector)` for the player, or `None` to keep drifting
pub fn update_player_vectors(event: &InputEvent, viewport: Viewport) -> Option<(i32, i32)> {
    match *event {
        InputEvent::Pointer { row, col } => Some((
            third_to_vector(row, viewport.rows / 3, VERTICAL_MODIFIER),
            third_to_vector(col, viewport.cols / 3, HORIZONTAL_MODIFIER),
        )),
        InputEvent::Key(key) => match key {
            Key::Up => Some((-VERTICAL_MODIFIER, 0)),
            Key::Down => Some((VERTICAL_MODIFIER, 0)),
            Key::Left => Some((0, -HORIZONTAL_MODIFIER)),
            Key::Right => Some((0, HORIZONTAL_MODIFIER)),
            Key::Stop => Some((0, 0)),
            Key::Menu | Key::Char(_) => None,
        },
    }
}

fn third_to_vector(pos: i32, third: i32, modifier: i32) -> i32 {
    if pos < third {
        -modifier
    } else if pos < 2 * third {
        0
    } else {
        modifier
    }
}

/// How close (in cells) a bigger bot has to be before the autopilot flees
const FLEE_DISTANCE: f32 = 15.0;

/// Demo steering for the player when nobody is at the keyboard.
///
/// Flees the nearest visible bot that could eat the player, otherwise
/// heads for the nearest visible bot it can eat, otherwise keeps drifting.
/// The decision is emitted as a pointer event so it flows through the
/// regular controller.
pub fn autopilot_event(state: &GameState) -> Option<InputEvent> {
    let player = state.entities.player();
    if !player.is_alive() {
        return None;
    }
    let radius = player.radius();
    let view = state.viewport;

    let visible = state.entities.bots().filter(|(_, bot)| {
        (bot.row - player.row).abs() <= view.rows / 2
            && (bot.col - player.col).abs() <= view.cols / 2
    });

    let mut threat: Option<(f32, i32, i32)> = None;
    let mut prey: Option<(f32, i32, i32)> = None;
    for (_, bot) in visible {
        let d_row = bot.row - player.row;
        let d_col = bot.col - player.col;
        let d = crate::distance(d_row, d_col);
        let slot = if bot.radius() > radius {
            &mut threat
        } else if bot.radius() < radius {
            &mut prey
        } else {
            continue;
        };
        if slot.is_none_or(|(best, _, _)| d < best) {
            *slot = Some((d, d_row, d_col));
        }
    }

    let (d_row, d_col) = match (threat, prey) {
        (Some((d, r, c)), _) if d < FLEE_DISTANCE => (-r.signum(), -c.signum()),
        (_, Some((_, r, c))) => (r.signum(), c.signum()),
        _ if player.row_vector == 0 && player.col_vector == 0 => (0, 1),
        _ => return None,
    };

    // Center of the matching 3x3 viewport region
    let row_third = view.rows / 3;
    let col_third = view.cols / 3;
    Some(InputEvent::Pointer {
        row: row_third * (d_row + 1) + row_third / 2,
        col: col_third * (d_col + 1) + col_third / 2,
    })
}
