//! Interactive terminal front end (crossterm)
//!
//! Arrow keys steer, space stops, a mouse click picks one of eight
//! directions from the 3x3 region it lands in, Backspace (or Esc) opens the
//! pause menu and `i` toggles the autopilot. Menus are drawn as a centered
//! box over the last frame and navigated with Up/Down and Enter.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use super::{InputSource, MenuAction, MenuFrontend, MenuPrompt};
use crate::consts::MAX_NICKNAME_LEN;
use crate::settings::{Difficulty, Viewport};
use crate::sim::{InputEvent, Key};

const PLAY_TEXT: &str = "Play";
const NEW_GAME_TEXT: &str = "New game";
const EXIT_GAME_TEXT: &str = "Exit game";
const CONTINUE_TEXT: &str = "Continue";
const EXIT_TEXT: &str = "Exit";
const NICKNAME_LABEL: &str = "Enter your name: ";
const DIFFICULTY_HEADING: &str = "Choose bot difficulty:";
const DIFFICULTY_OPTIONS: [&str; 3] = ["EASY", "MEDIUM", "HARD"];

/// Raw mode, alternate screen and mouse capture for as long as it lives
pub struct TerminalSession;

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on, dropping restores the terminal
        let session = Self;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(session)
    }

    /// Visible area, `None` when the size cannot be queried
    pub fn viewport() -> Option<Viewport> {
        match terminal::size() {
            Ok((cols, rows)) => Some(Viewport {
                rows: rows as i32,
                cols: cols as i32,
            }),
            Err(e) => {
                log::warn!("Cannot read terminal size: {e}");
                None
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture, Show, LeaveAlternateScreen) {
            log::error!("Failed to leave alternate screen: {e}");
        }
        if let Err(e) = disable_raw_mode() {
            log::error!("Failed to disable raw mode: {e}");
        }
    }
}

/// What a terminal event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(InputEvent),
    ToggleAutopilot,
}

/// Translate one terminal event; `None` for events the game ignores
pub fn translate(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => translate_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => Some(Command::Input(InputEvent::Pointer {
                row: mouse.row as i32,
                col: mouse.column as i32,
            })),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let key = match key.code {
        KeyCode::Char('c') if ctrl => Key::Menu,
        KeyCode::Char('i') | KeyCode::Char('I') => return Some(Command::ToggleAutopilot),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Stop,
        KeyCode::Backspace | KeyCode::Esc => Key::Menu,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(Command::Input(InputEvent::Key(key)))
}

/// Keyboard and mouse input, polled without blocking
#[derive(Debug, Clone, Default)]
pub struct TerminalInput {
    idle_mode: bool,
}

impl TerminalInput {
    /// `idle_mode` starts the session under the autopilot
    pub fn new(idle_mode: bool) -> Self {
        Self { idle_mode }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Option<InputEvent> {
        // Skip events the game ignores (mouse motion, releases) so one
        // meaningful event is consumed per tick
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    log::warn!("Input poll failed: {e}");
                    return None;
                }
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("Input read failed: {e}");
                    return None;
                }
            };
            match translate(&event) {
                Some(Command::Input(input)) => return Some(input),
                Some(Command::ToggleAutopilot) => {
                    self.idle_mode = !self.idle_mode;
                    log::info!("Idle mode: {}", self.idle_mode);
                }
                None => {}
            }
        }
    }

    fn idle_mode(&self) -> bool {
        self.idle_mode
    }
}

/// Result of feeding one key to a menu widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    Open,
    Done(T),
    /// Closed with the menu key
    Dismissed,
}

/// Vertical option list with one highlighted entry
#[derive(Debug, Clone)]
pub struct OptionList {
    options: Vec<&'static str>,
    selected: usize,
}

impl OptionList {
    pub fn new(options: &[&'static str]) -> Self {
        Self {
            options: options.to_vec(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn options(&self) -> &[&'static str] {
        &self.options
    }

    pub fn handle(&mut self, code: KeyCode) -> Step<usize> {
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.options.len().saturating_sub(1))
            }
            KeyCode::Enter => return Step::Done(self.selected),
            KeyCode::Backspace | KeyCode::Esc => return Step::Dismissed,
            _ => {}
        }
        Step::Open
    }
}

/// Single-line text input bounded to `max_len` characters
#[derive(Debug, Clone)]
pub struct TextField {
    text: String,
    max_len: usize,
}

impl TextField {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            max_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle(&mut self, code: KeyCode) -> Step<String> {
        match code {
            KeyCode::Char(c) if !c.is_control() && self.text.chars().count() < self.max_len => {
                self.text.push(c)
            }
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Enter => return Step::Done(self.text.trim().to_string()),
            KeyCode::Esc => return Step::Dismissed,
            _ => {}
        }
        Step::Open
    }
}

/// Blocking menus drawn over the game screen
pub struct TerminalMenus {
    out: Stdout,
    default_difficulty: Difficulty,
}

impl TerminalMenus {
    pub fn new(default_difficulty: Difficulty) -> Self {
        Self {
            out: io::stdout(),
            default_difficulty,
        }
    }

    fn ask(&mut self, prompt: MenuPrompt) -> io::Result<MenuAction> {
        let heading = prompt.heading();
        let action = match prompt {
            MenuPrompt::Welcome => match self.pick(heading, &[PLAY_TEXT, EXIT_TEXT])? {
                Step::Done(0) => {
                    let name = self.read_name()?;
                    let difficulty = self.read_difficulty()?;
                    MenuAction::Play { name, difficulty }
                }
                _ => MenuAction::Exit,
            },
            MenuPrompt::Paused => match self.pick(heading, &[CONTINUE_TEXT, EXIT_GAME_TEXT])? {
                Step::Done(1) => MenuAction::NewGame,
                _ => MenuAction::Continue,
            },
            MenuPrompt::Ended(_) => match self.pick(heading, &[NEW_GAME_TEXT, EXIT_TEXT])? {
                Step::Done(0) => MenuAction::NewGame,
                _ => MenuAction::Exit,
            },
        };
        Ok(action)
    }

    fn pick(&mut self, heading: &str, options: &[&'static str]) -> io::Result<Step<usize>> {
        let mut list = OptionList::new(options);
        loop {
            self.draw_list(heading, &list)?;
            match list.handle(read_key()?) {
                Step::Open => {}
                step => return Ok(step),
            }
        }
    }

    fn read_name(&mut self) -> io::Result<String> {
        let mut field = TextField::new(MAX_NICKNAME_LEN);
        loop {
            let line = format!("{NICKNAME_LABEL}{}", field.text());
            self.draw_box(&[(line.as_str(), false)], NICKNAME_LABEL.len() + MAX_NICKNAME_LEN)?;
            match field.handle(read_key()?) {
                Step::Open => {}
                Step::Done(name) => return Ok(name),
                Step::Dismissed => return Ok(field.text().trim().to_string()),
            }
        }
    }

    fn read_difficulty(&mut self) -> io::Result<Difficulty> {
        let levels = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
        let step = self.pick(DIFFICULTY_HEADING, &DIFFICULTY_OPTIONS)?;
        Ok(match step {
            Step::Done(i) => levels[i],
            _ => self.default_difficulty,
        })
    }

    fn draw_list(&mut self, heading: &str, list: &OptionList) -> io::Result<()> {
        let mut lines = vec![(heading, false), ("", false)];
        for (i, option) in list.options().iter().enumerate() {
            lines.push((*option, i == list.selected()));
        }
        self.draw_box(&lines, heading.len())
    }

    /// Centered bordered box; highlighted lines are drawn reversed
    fn draw_box(&mut self, lines: &[(&str, bool)], min_width: usize) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let inner = lines
            .iter()
            .map(|(text, _)| text.chars().count())
            .max()
            .unwrap_or(0)
            .max(min_width)
            + 4;
        let height = lines.len() + 2;
        let left = (cols as usize).saturating_sub(inner + 2) / 2;
        let top = (rows as usize).saturating_sub(height) / 2;

        let border = format!("+{}+", "-".repeat(inner));
        queue!(self.out, MoveTo(left as u16, top as u16), Print(&border))?;
        for (i, (text, highlighted)) in lines.iter().enumerate() {
            let width = text.chars().count();
            let pad = (inner - width) / 2;
            let row = (top + 1 + i) as u16;
            queue!(
                self.out,
                MoveTo(left as u16, row),
                Print("|"),
                Print(" ".repeat(pad))
            )?;
            if *highlighted {
                queue!(
                    self.out,
                    SetAttribute(Attribute::Reverse),
                    Print(text),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue!(self.out, Print(text))?;
            }
            queue!(self.out, Print(" ".repeat(inner - width - pad)), Print("|"))?;
        }
        queue!(
            self.out,
            MoveTo(left as u16, (top + height - 1) as u16),
            Print(&border)
        )?;
        self.out.flush()
    }
}

impl MenuFrontend for TerminalMenus {
    fn choose(&mut self, prompt: MenuPrompt) -> MenuAction {
        match self.ask(prompt) {
            Ok(action) => {
                log::debug!("{prompt:?} -> {action:?}");
                action
            }
            Err(e) => {
                log::error!("Menu failed, exiting: {e}");
                MenuAction::Exit
            }
        }
    }
}

/// Block until a key is pressed
fn read_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(key.code);
            }
        }
    }
}
