//! Platform abstraction layer
//!
//! The game talks to the outside world through narrow seams:
//! - `InputSource`: at most one raw input event per tick, polled without blocking
//! - `MenuFrontend`: answers the welcome, pause and end-of-game menus
//! - `NameSource`: display names for bots
//!
//! `terminal` implements them over crossterm for interactive play; the
//! scripted versions here drive `--demo` runs, headless sessions and tests.

pub mod terminal;

pub use terminal::{TerminalInput, TerminalMenus, TerminalSession};

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::settings::Difficulty;
use crate::sim::{InputEvent, Outcome};

/// Non-blocking per-tick input
pub trait InputSource {
    /// Next pending event, `None` when nothing happened this tick
    fn poll(&mut self) -> Option<InputEvent>;

    /// Whether the autopilot should steer when `poll` has nothing
    fn idle_mode(&self) -> bool {
        false
    }
}

/// Which menu is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPrompt {
    /// Before a session: play or exit
    Welcome,
    /// The player hit the menu key
    Paused,
    /// The end countdown ran out
    Ended(Outcome),
}

impl MenuPrompt {
    pub fn heading(&self) -> &'static str {
        match self {
            MenuPrompt::Welcome => "Welcome to the Agar.io!",
            MenuPrompt::Paused => "You paused the game",
            MenuPrompt::Ended(Outcome::Won) => "Congratulations, you've won!",
            MenuPrompt::Ended(Outcome::Lost) => "Unfortunately, you lost!",
        }
    }
}

/// Answer to a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Start the generated world with this nickname and bot difficulty
    Play { name: String, difficulty: Difficulty },
    /// Back to the paused session
    Continue,
    /// Throw the world away and generate a new one
    NewGame,
    Exit,
}

/// Menu collaborator
pub trait MenuFrontend {
    fn choose(&mut self, prompt: MenuPrompt) -> MenuAction;
}

/// Display names for bots
pub trait NameSource {
    /// A name, or `None` when the source has nothing to give
    fn next_name(&mut self, rng: &mut dyn RngCore) -> Option<String>;
}

/// Every bot stays unnamed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameSource for NoNames {
    fn next_name(&mut self, _rng: &mut dyn RngCore) -> Option<String> {
        None
    }
}

/// Random picks from a fixed word list
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// One word per line; blank lines are skipped
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl NameSource for WordList {
    fn next_name(&mut self, rng: &mut dyn RngCore) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..self.words.len());
        Some(self.words[pick].clone())
    }
}

/// Replays a fixed list of per-tick inputs, then goes quiet
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Option<InputEvent>>,
    idle_mode: bool,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Option<InputEvent>>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
            idle_mode: false,
        }
    }

    /// Nothing scripted; the autopilot plays
    pub fn autopilot() -> Self {
        Self {
            ticks: VecDeque::new(),
            idle_mode: true,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.ticks.pop_front().flatten()
    }

    fn idle_mode(&self) -> bool {
        self.idle_mode
    }
}

/// Plays a fixed number of sessions, continues after pauses, then exits
#[derive(Debug, Clone)]
pub struct AutoMenus {
    pub name: String,
    pub difficulty: Difficulty,
    sessions_left: u32,
}

impl AutoMenus {
    pub fn new(name: impl Into<String>, difficulty: Difficulty, sessions: u32) -> Self {
        Self {
            name: name.into(),
            difficulty,
            sessions_left: sessions,
        }
    }
}

impl MenuFrontend for AutoMenus {
    fn choose(&mut self, prompt: MenuPrompt) -> MenuAction {
        match prompt {
            MenuPrompt::Welcome if self.sessions_left > 0 => {
                self.sessions_left -= 1;
                MenuAction::Play {
                    name: self.name.clone(),
                    difficulty: self.difficulty,
                }
            }
            MenuPrompt::Welcome => MenuAction::Exit,
            MenuPrompt::Paused => MenuAction::Continue,
            MenuPrompt::Ended(_) if self.sessions_left > 0 => MenuAction::NewGame,
            MenuPrompt::Ended(_) => MenuAction::Exit,
        }
    }
}
