//! Game loop driver
//!
//! Owns the configuration and the current session, and runs the
//! MENU / PLAYING / PAUSED / ENDED state machine until a menu answers Exit
//! or the frame limit is reached. A new game throws the session away and
//! generates a fresh world.

use crate::config::GameConfig;
use crate::platform::{InputSource, MenuAction, MenuFrontend, MenuPrompt, NameSource};
use crate::renderer::{FrameView, Renderer};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Outcome, TickInput, tick};

/// Why `Game::run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// A menu answered Exit
    Quit,
    /// The frame limit was reached mid-session
    FrameLimit,
}

/// What happened during one `Game::run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub exit: Exit,
    /// PLAYING ticks rendered
    pub frames: u64,
    /// Sessions started from the welcome menu
    pub sessions: u32,
    /// Outcome of every finished session, in order
    pub outcomes: Vec<Outcome>,
}

pub struct Game {
    config: GameConfig,
    settings: Settings,
    names: Box<dyn NameSource>,
    seed: u64,
    /// Sleep for the tick interval after each PLAYING tick
    paced: bool,
    state: GameState,
}

impl Game {
    /// Generate the first world; the game waits in MENU
    pub fn new(
        config: GameConfig,
        settings: Settings,
        seed: u64,
        mut names: Box<dyn NameSource>,
    ) -> Self {
        let state = GameState::new(&config, &settings, seed, names.as_mut());
        Self {
            config,
            settings,
            names,
            seed,
            paced: true,
            state,
        }
    }

    /// Run ticks back to back instead of holding the wall-clock rate
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Drive the state machine. `max_frames` bounds the PLAYING ticks.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        menus: &mut dyn MenuFrontend,
        renderer: &mut dyn Renderer,
        max_frames: Option<u64>,
    ) -> RunSummary {
        let mut summary = RunSummary {
            exit: Exit::Quit,
            frames: 0,
            sessions: 0,
            outcomes: Vec::new(),
        };

        loop {
            match self.state.phase {
                GamePhase::Menu => match menus.choose(MenuPrompt::Welcome) {
                    MenuAction::Play { name, difficulty } => {
                        self.state.start(&name, difficulty);
                        summary.sessions += 1;
                    }
                    MenuAction::Continue => {
                        self.state.start("", self.settings.difficulty);
                        summary.sessions += 1;
                    }
                    MenuAction::NewGame => self.regenerate(),
                    MenuAction::Exit => break,
                },
                GamePhase::Playing => {
                    if max_frames.is_some_and(|limit| summary.frames >= limit) {
                        log::info!("Frame limit reached after {} frames", summary.frames);
                        summary.exit = Exit::FrameLimit;
                        break;
                    }
                    let tick_input = TickInput {
                        event: input.poll(),
                        idle_mode: input.idle_mode(),
                    };
                    tick(&mut self.state, &tick_input);
                    renderer.render(&FrameView::of(&self.state));
                    summary.frames += 1;
                    if self.paced {
                        std::thread::sleep(self.state.cadence.tick_interval());
                    }
                }
                GamePhase::Paused => match menus.choose(MenuPrompt::Paused) {
                    MenuAction::Continue | MenuAction::Play { .. } => self.state.resume(),
                    MenuAction::NewGame => self.regenerate(),
                    MenuAction::Exit => break,
                },
                GamePhase::Ended(outcome) => {
                    summary.outcomes.push(outcome);
                    match menus.choose(MenuPrompt::Ended(outcome)) {
                        MenuAction::Exit => break,
                        _ => self.regenerate(),
                    }
                }
            }
        }

        summary
    }

    /// Discard the session and build a new world in MENU
    fn regenerate(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.state = GameState::new(
            &self.config,
            &self.settings,
            self.seed,
            self.names.as_mut(),
        );
        log::info!("New world generated with seed {}", self.seed);
    }
}
