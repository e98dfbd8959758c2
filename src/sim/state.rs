//! Game state and core simulation types
//!
//! One `GameState` is one session: it owns the world grid and the entity
//! registry and is rebuilt from scratch on restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::{Cell, Color, WorldGrid};
use super::spawn::{spawn_blob, spawn_entity};
use crate::config::GameConfig;
use crate::consts::*;
use crate::platform::NameSource;
use crate::radius_for_size;
use crate::settings::{Cadence, Difficulty, Settings, Viewport};

/// Result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// World generated, waiting for the player to start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Countdown finished after a win or loss
    Ended(Outcome),
}

/// Player or bot
#[derive(Debug, Clone)]
pub struct Entity {
    pub row: i32,
    pub col: i32,
    pub row_vector: i32,
    pub col_vector: i32,
    /// Accumulated size; only ever grows
    size: u32,
    alive: bool,
    pub color: Color,
    pub name: String,
}

impl Entity {
    /// A living entity centered at `(row, col)`
    pub fn new(row: i32, col: i32, size: u32, color: Color) -> Self {
        Self {
            row,
            col,
            row_vector: 0,
            col_vector: 0,
            size,
            alive: true,
            color,
            name: String::new(),
        }
    }

    /// Slot whose spawn failed: zero size, never simulated
    pub fn absent(color: Color) -> Self {
        Self {
            row: 0,
            col: 0,
            row_vector: 0,
            col_vector: 0,
            size: 0,
            alive: false,
            color,
            name: String::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        radius_for_size(self.size)
    }

    pub(crate) fn grow(&mut self, amount: u32) {
        self.size = self.size.saturating_add(amount);
    }

    /// Consumed by a bigger entity
    pub(crate) fn eliminate(&mut self) {
        self.alive = false;
    }
}

/// Fixed-capacity entity list; index 0 is the player, the rest are bots
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn player(&self) -> &Entity {
        &self.entities[PLAYER]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[PLAYER]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Living bots with their registry indices
    pub fn bots(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .skip(PLAYERS)
            .filter(|(_, e)| e.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_alive()).count()
    }
}

impl std::ops::Index<usize> for EntityRegistry {
    type Output = Entity;

    fn index(&self, index: usize) -> &Entity {
        &self.entities[index]
    }
}

impl std::ops::IndexMut<usize> for EntityRegistry {
    fn index_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.entities[index]
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub grid: WorldGrid,
    pub entities: EntityRegistry,
    /// Live blobs in the grid
    pub blobs: usize,
    /// Cap on live blobs, derived from world size
    pub max_blobs: usize,
    /// Living entities (player included) as of the last evaluation
    pub alive: usize,
    /// Ticks played this session
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub viewport: Viewport,
    pub cadence: Cadence,
    /// Ticks left before an over game leaves PLAYING
    pub end_countdown: Option<u32>,
}

impl GameState {
    /// Generate a fresh world: entities first, then the initial blob field
    pub fn new(
        config: &GameConfig,
        settings: &Settings,
        seed: u64,
        names: &mut dyn NameSource,
    ) -> Self {
        let mut state = Self::empty(config.world_size, settings, seed);
        let count = config.entity_count();

        let mut entities = Vec::with_capacity(count);
        for index in 0..count {
            let color = Color::random(&mut state.rng);
            let mut entity = match spawn_entity(&state.grid, &entities, &mut state.rng) {
                Some(spot) => {
                    let size = spot.radius as u32 * SIZE_MODIFIER;
                    state
                        .grid
                        .set(spot.row, spot.col, Cell::Entity { index });
                    Entity::new(spot.row, spot.col, size, color)
                }
                None => {
                    log::debug!("No room for entity {index}, slot stays empty");
                    Entity::absent(color)
                }
            };
            if index >= PLAYERS {
                entity.name = bounded_name(
                    names.next_name(&mut state.rng).unwrap_or_default(),
                    MAX_NAME_LEN,
                );
            }
            entities.push(entity);
        }
        state.entities = EntityRegistry::new(entities);
        state.alive = state.entities.alive_count();

        // Spawn more blobs at once in the beginning
        for _ in 0..state.max_blobs.saturating_sub(1) {
            spawn_blob(&mut state.grid, &mut state.blobs, state.max_blobs, &mut state.rng);
        }

        log::info!(
            "World {}x{} generated: {} of {} entities placed, {} blobs (cap {})",
            config.world_size,
            config.world_size,
            state.alive,
            count,
            state.blobs,
            state.max_blobs
        );
        state
    }

    /// Build a session around hand-placed entities (no blobs).
    ///
    /// Living entities are written into the grid at their positions.
    pub fn with_entities(
        world_size: usize,
        settings: &Settings,
        seed: u64,
        entities: Vec<Entity>,
    ) -> Self {
        let mut state = Self::empty(world_size, settings, seed);
        for (index, entity) in entities.iter().enumerate() {
            if entity.is_alive() {
                state
                    .grid
                    .set(entity.row, entity.col, Cell::Entity { index });
            }
        }
        state.entities = EntityRegistry::new(entities);
        state.alive = state.entities.alive_count();
        state
    }

    fn empty(world_size: usize, settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid: WorldGrid::new(world_size),
            entities: EntityRegistry::default(),
            blobs: 0,
            max_blobs: world_size / BLOB_MAX_RATIO + 1,
            alive: 0,
            time_ticks: 0,
            phase: GamePhase::Menu,
            difficulty: settings.difficulty,
            viewport: settings.viewport,
            cadence: settings.cadence,
            end_countdown: None,
        }
    }

    /// Leave the menu: name the player and fix the bot difficulty
    pub fn start(&mut self, name: &str, difficulty: Difficulty) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.entities.player_mut().name = bounded_name(name.to_string(), MAX_NICKNAME_LEN);
        self.difficulty = difficulty;
        self.phase = GamePhase::Playing;
        log::info!("Session started ({} bots)", difficulty.as_str());
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Bots still alive as of the last evaluation
    pub fn alive_bots(&self) -> usize {
        self.alive.saturating_sub(PLAYERS)
    }

    /// Win or loss reached (the end countdown runs while this holds)
    pub fn is_over(&self) -> bool {
        !self.entities.player().is_alive() || self.alive <= PLAYERS
    }

    /// Upper-left world cell shown by a viewport centered on the player
    pub fn viewport_origin(&self) -> (i32, i32) {
        let player = self.entities.player();
        (
            player.row - self.viewport.rows / 2,
            player.col - self.viewport.cols / 2,
        )
    }
}

fn bounded_name(name: String, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name
    } else {
        name.chars().take(max_len).collect()
    }
}
