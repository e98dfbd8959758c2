//! Agar.io entry point
//!
//! Usage:
//!   agario <WORLD_SIZE> <BOT_COUNT> [--difficulty hard] [--seed N]
//!   RUST_LOG=debug agario 300 40 --demo --frames 2000 2>agario.log
//!
//! Arrows steer, space stops, a click steers toward the clicked region,
//! Backspace pauses and `i` toggles the autopilot.

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use agario::consts::*;
use agario::game::{Game, RunSummary};
use agario::platform::{
    AutoMenus, NameSource, NoNames, ScriptedInput, TerminalInput, TerminalMenus, TerminalSession,
    WordList,
};
use agario::renderer::TerminalRenderer;
use agario::{Difficulty, GameConfig, Settings};

#[derive(Parser)]
#[command(name = "agario")]
#[command(about = "Grow by eating blobs and smaller circles in a square world")]
struct Args {
    /// Cells per side of the square world
    #[arg(value_parser = clap::value_parser!(u64).range(MIN_WORLD_SIZE as u64..=MAX_WORLD_SIZE as u64))]
    world_size: u64,

    /// Number of bots
    #[arg(value_parser = clap::value_parser!(u64).range(MIN_BOT_COUNT as u64..=MAX_BOT_COUNT as u64))]
    bot_count: u64,

    /// Bot difficulty: easy, medium or hard
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// World seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Bot names, one per line
    #[arg(long)]
    names: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Let the autopilot play one session without keyboard or menus
    #[arg(long)]
    demo: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn load_names(path: Option<PathBuf>) -> Box<dyn NameSource> {
    let Some(path) = path else {
        return Box::new(NoNames);
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            let names = WordList::parse(&text);
            log::info!("Loaded {} bot names from {}", names.len(), path.display());
            Box::new(names)
        }
        Err(e) => {
            log::warn!("Bots stay unnamed ({}: {e})", path.display());
            Box::new(NoNames)
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match GameConfig::new(args.world_size as usize, args.bot_count as usize) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let difficulty = args.difficulty.unwrap_or(settings.difficulty);
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Starting {}x{} world, {} bots, {} difficulty, seed {seed}",
        config.world_size,
        config.world_size,
        config.bot_count,
        difficulty.as_str()
    );

    let session = match TerminalSession::enter() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Cannot set up the terminal: {e}");
            std::process::exit(1);
        }
    };
    if let Some(viewport) = TerminalSession::viewport() {
        settings.viewport = viewport;
    }

    let viewport = settings.viewport;
    let mut game = Game::new(config, settings, seed, load_names(args.names));
    let mut renderer = TerminalRenderer::new(io::stdout(), viewport);
    let summary = if args.demo {
        let mut input = ScriptedInput::autopilot();
        let mut menus = AutoMenus::new("you", difficulty, 1);
        game.run(&mut input, &mut menus, &mut renderer, args.frames)
    } else {
        let mut input = TerminalInput::new(false);
        let mut menus = TerminalMenus::new(difficulty);
        game.run(&mut input, &mut menus, &mut renderer, args.frames)
    };
    // Restore the terminal before printing the summary
    drop(session);
    report(&game, &summary);
}

fn report(game: &Game, summary: &RunSummary) {
    match summary.outcomes.last() {
        Some(outcome) => log::info!("{outcome:?} after {} frames", summary.frames),
        None => log::info!("Stopped after {} frames", summary.frames),
    }
    println!(
        "Final size: {} ({} enemies left)",
        game.state().entities.player().size(),
        game.state().alive_bots()
    );
}
