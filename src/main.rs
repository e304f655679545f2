//! Frog Pond headless driver
//!
//! Runs sessions without a window: an autopilot steers the pad, the score is
//! submitted at game over and the leaderboard is printed.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;

use frog_pond::audio::NullBackend;
use frog_pond::config::{
    DEFAULT_DATA_DIR, DEFAULT_FALLBACK_MUSIC, DEFAULT_SHARED_ASSETS_DIR, DEFAULT_SKINS_ROOT,
};
use frog_pond::consts::*;
use frog_pond::sim::{GameEvent, GameState, TickInput};
use frog_pond::{Game, GameConfig};

#[derive(Parser, Debug)]
#[command(name = "frog-pond")]
#[command(about = "Catch the frogs before they fall in the water (headless autopilot run)")]
struct Args {
    /// Folder holding one sub-folder per skin
    #[arg(long, default_value = DEFAULT_SKINS_ROOT)]
    skins_root: PathBuf,

    /// Folder for settings and high scores
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Music played when a skin has none
    #[arg(long, default_value = DEFAULT_FALLBACK_MUSIC)]
    fallback_music: PathBuf,

    /// Folder holding the shared life icon (frog_wave.bmp or life.bmp)
    #[arg(long, default_value = DEFAULT_SHARED_ASSETS_DIR)]
    shared_assets_dir: PathBuf,

    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if lives remain
    #[arg(long)]
    ticks: Option<u64>,

    /// Name recorded on the leaderboard
    #[arg(long, default_value = "")]
    name: String,

    /// Run as fast as possible instead of at the tick rate
    #[arg(long)]
    unpaced: bool,

    /// List loadable skins and exit
    #[arg(long)]
    list_skins: bool,
}

fn unix_now() -> anyhow::Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before 1970")?
        .as_secs())
}

/// Steer the pad under the lowest falling frog
fn autopilot(state: &GameState) -> TickInput {
    let target = state
        .frogs
        .iter()
        .filter(|f| f.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| state.frogs.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)));

    let Some(frog) = target else {
        return TickInput::default();
    };
    let dx = frog.bounds().center().x - state.pad.bounds().center().x;
    TickInput {
        left: dx < -PAD_SPEED / 2.0,
        right: dx > PAD_SPEED / 2.0,
        pause: false,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Frog Pond (headless) starting...");

    let config = GameConfig {
        skins_root: args.skins_root,
        data_dir: args.data_dir,
        fallback_music: args.fallback_music,
        shared_assets_dir: args.shared_assets_dir,
        seed: match args.seed {
            Some(seed) => seed,
            None => unix_now()?,
        },
    };
    let mut game = Game::new(config, Some(Box::new(NullBackend::new())));

    if args.list_skins {
        let active = game.catalog().active_index();
        for (i, skin) in game.catalog().skins().iter().enumerate() {
            let marker = if i == active { "*" } else { " " };
            println!("{marker} {}", skin.name);
        }
        return Ok(());
    }

    game.start_game();
    let frame = Duration::from_secs_f32(TICK_DT);
    let mut ticks = 0u64;

    while !game.is_over() && args.ticks.is_none_or(|limit| ticks < limit) {
        let started = Instant::now();
        let input = game.session().map(autopilot).unwrap_or_default();

        for event in game.tick(&input) {
            match event {
                GameEvent::Missed { lives_left } => println!("Splash! {lives_left} lives left"),
                GameEvent::LevelChanged { to, .. } => println!("Level {}", to + 1),
                GameEvent::SkinChanged { name } => println!("Skin: {name}"),
                GameEvent::GameOver { score } => println!("Game over - score {score}"),
                GameEvent::Caught { .. } => {}
            }
        }
        ticks += 1;

        if !args.unpaced {
            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    let score = game.session().map(|s| s.score).unwrap_or(0);
    if game.is_over() {
        match game.submit_score(&args.name, unix_now()?) {
            Some(rank) => println!("New high score! Rank #{rank}"),
            None => println!("Score {score} didn't make the board"),
        }
    } else {
        println!("Stopped after {ticks} ticks with score {score}");
    }

    println!("\nHIGH SCORES");
    for (i, entry) in game.high_scores().entries.iter().enumerate() {
        println!("{:>2}. {:<12} {:>8}", i + 1, entry.name, entry.score);
    }
    Ok(())
}
