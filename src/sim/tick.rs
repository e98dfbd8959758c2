//! Fixed timestep simulation tick
//!
//! One PLAYING tick runs, in order: blob spawn (every `blob_update_rate`
//! ticks), bot steering (every `vector_update_rate` ticks), player input,
//! motion, collision evaluation, re-clamping of entities that grew against
//! an edge. Rendering happens after the tick.

use super::bot::update_bot_vectors;
use super::collision::eval_positions;
use super::input::{InputEvent, Key, autopilot_event, update_player_vectors};
use super::motion::{settle_edges, update_positions};
use super::spawn::spawn_blob;
use super::state::{GamePhase, GameState, Outcome};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest raw input event, if any arrived this tick
    pub event: Option<InputEvent>,
    /// Idle/demo mode - the autopilot steers when no event arrived
    pub idle_mode: bool,
}

impl TickInput {
    pub fn event(event: InputEvent) -> Self {
        Self {
            event: Some(event),
            idle_mode: false,
        }
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.event == Some(InputEvent::Key(Key::Menu)) && state.phase == GamePhase::Playing {
        state.pause();
        log::info!("Game paused at tick {}", state.time_ticks);
        return;
    }

    // Only PLAYING advances the world
    if state.phase != GamePhase::Playing {
        return;
    }

    let ticks = state.time_ticks;
    if ticks.is_multiple_of(state.cadence.blob_update_rate) {
        spawn_blob(&mut state.grid, &mut state.blobs, state.max_blobs, &mut state.rng);
    }
    if ticks.is_multiple_of(state.cadence.vector_update_rate) {
        update_bot_vectors(
            &mut state.entities,
            state.viewport,
            state.difficulty.chase_probability(),
            &mut state.rng,
        );
    }

    let event = match input.event {
        Some(event) => Some(event),
        None if input.idle_mode => autopilot_event(state),
        None => None,
    };
    if let Some((row_vector, col_vector)) =
        event.and_then(|e| update_player_vectors(&e, state.viewport))
    {
        let player = state.entities.player_mut();
        player.row_vector = row_vector;
        player.col_vector = col_vector;
    }

    let absorbed = update_positions(&mut state.entities, &mut state.grid);
    let eval = eval_positions(&mut state.entities, &mut state.grid);
    let settled = settle_edges(&mut state.entities, &mut state.grid);
    state.blobs = state.blobs.saturating_sub(absorbed + eval.blobs_eaten + settled);
    state.alive = eval.alive;

    // Keep the last frames on screen before leaving PLAYING
    if state.is_over() {
        let left = state
            .end_countdown
            .unwrap_or(state.cadence.end_delay_ticks())
            .saturating_sub(1);
        state.end_countdown = Some(left);
        if left == 0 {
            let outcome = if state.entities.player().is_alive() {
                Outcome::Won
            } else {
                Outcome::Lost
            };
            state.phase = GamePhase::Ended(outcome);
            log::info!(
                "Game over after {} ticks: {:?} (size {})",
                ticks + 1,
                outcome,
                state.entities.player().size()
            );
        }
    }

    state.time_ticks = ticks.wrapping_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::NoNames;
    use crate::settings::{Difficulty, Settings};
    use crate::sim::grid::{Cell, Color};
    use crate::sim::state::Entity;

    fn playing(world_size: usize, bots: usize, seed: u64) -> GameState {
        let config = GameConfig::new(world_size, bots).unwrap();
        let mut state = GameState::new(&config, &Settings::default(), seed, &mut NoNames);
        state.start("me", Difficulty::Medium);
        state
    }

    #[test]
    fn test_menu_does_not_tick() {
        let config = GameConfig::new(100, 2).unwrap();
        let mut state = GameState::new(&config, &Settings::default(), 1, &mut NoNames);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(100, 2, 12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);

        tick(&mut state, &TickInput::event(InputEvent::Key(Key::Menu)));
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);

        state.resume();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_player_keeps_vector_without_input() {
        let mut state = playing(300, 0, 4);
        tick(&mut state, &TickInput::event(InputEvent::Key(Key::Right)));
        let col = state.entities.player().col;
        tick(&mut state, &TickInput::default());
        let player = state.entities.player();
        assert_eq!(player.col_vector, crate::consts::HORIZONTAL_MODIFIER);
        assert!(player.col >= col);
    }

    #[test]
    fn test_win_countdown() {
        let settings = Settings::default();
        let mut state = GameState::with_entities(
            100,
            &settings,
            0,
            vec![
                Entity::new(50, 50, 50, Color::Red),
                Entity::new(50, 54, 5, Color::Blue),
            ],
        );
        state.start("me", Difficulty::Hard);
        // Keep the blob spawner and bot steering out of the way
        state.max_blobs = 0;
        state.time_ticks = 1;
        state.cadence.vector_update_rate = 1_000_000;

        tick(&mut state, &TickInput::default());
        assert!(!state.entities[1].is_alive());
        assert_eq!(state.entities.player().size(), 52);
        assert_eq!(state.alive_bots(), 0);
        assert_eq!(state.end_countdown, Some(settings.cadence.end_delay_ticks() - 1));
        assert_eq!(state.phase, GamePhase::Playing);

        for _ in 0..settings.cadence.end_delay_ticks() {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Won));
    }

    #[test]
    fn test_loss_when_player_eaten() {
        let mut state = GameState::with_entities(
            100,
            &Settings::default(),
            0,
            vec![
                Entity::new(50, 54, 5, Color::Red),
                Entity::new(50, 50, 50, Color::Blue),
                Entity::new(10, 10, 20, Color::Green),
            ],
        );
        state.start("me", Difficulty::Hard);
        state.max_blobs = 0;
        state.time_ticks = 1;
        state.cadence.vector_update_rate = 1_000_000;

        for _ in 0..state.cadence.end_delay_ticks() {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.entities.player().is_alive());
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Lost));
    }

    #[test]
    fn test_grid_invariant_holds_over_many_ticks() {
        let mut state = playing(150, 40, 2024);
        let input = TickInput {
            event: None,
            idle_mode: true,
        };
        for _ in 0..300 {
            tick(&mut state, &input);
            assert_eq!(state.grid.entity_cell_count(), state.entities.alive_count());
            assert_eq!(state.blobs, state.grid.blob_count());
            assert!(state.blobs <= state.max_blobs);
            for (index, e) in state.entities.iter().enumerate() {
                if e.is_alive() {
                    assert_eq!(state.grid.get(e.row, e.col), Some(Cell::Entity { index }));
                }
            }
            if matches!(state.phase, GamePhase::Ended(_)) {
                break;
            }
        }
    }

    #[test]
    fn test_growth_at_edge_is_clamped_same_tick() {
        // Player at the top edge with radius 2.5, about to eat a blob
        // that lifts it to radius 3.5
        let mut state = GameState::with_entities(
            100,
            &Settings::default(),
            0,
            vec![Entity::new(2, 50, 29, Color::Red)],
        );
        state.start("me", Difficulty::Hard);
        state.max_blobs = 5;
        state.time_ticks = 1;
        state.cadence.vector_update_rate = 1_000_000;
        state.grid.set(4, 50, Cell::Blob { color: Color::Green });
        state.blobs = 1;

        tick(&mut state, &TickInput::default());
        let player = state.entities.player();
        assert_eq!(player.size(), 30);
        assert_eq!(player.row, 3);
        assert!(player.row - player.radius() as i32 >= 0);
        assert_eq!(state.grid.cell(3, 50), Cell::Entity { index: 0 });
        assert_eq!(state.blobs, 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(200, 15, 99999);
        let mut b = playing(200, 15, 99999);
        let input = TickInput {
            event: None,
            idle_mode: true,
        };
        for _ in 0..100 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.blobs, b.blobs);
        assert_eq!(a.alive, b.alive);
        for (ea, eb) in a.entities.iter().zip(b.entities.iter()) {
            assert_eq!((ea.row, ea.col, ea.size()), (eb.row, eb.col, eb.size()));
        }
    }
}
