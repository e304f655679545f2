//! Frog Pond - catch the frogs before they fall in the water
//!
//! Core modules:
//! - `assets`: Skin discovery and fuzzy asset lookup
//! - `rules`: Level-rule normalization and score-to-level lookup
//! - `sim`: Deterministic simulation (pad, frogs, forces, misses)
//! - `game`: Session controller tying skins, rules and the simulation together
//! - `settings` / `highscores`: Persisted player choices and leaderboard
//! - `audio`: Background music selection

pub mod assets;
pub mod audio;
pub mod config;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod rules;
pub mod settings;
pub mod sim;

pub use assets::{AssetRole, ImageHandle, Skin, SkinCatalog};
pub use config::{DataPaths, GameConfig};
pub use game::Game;
pub use highscores::HighScores;
pub use rules::{LevelRule, RuleSet, SpeedRange};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Fixed tick rate; one simulation update per rendered frame
    pub const TICK_RATE: u32 = 60;
    /// Seconds per tick
    pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Pad defaults
    pub const PAD_SPEED: f32 = 12.0;
    /// Gap between the pad's bottom edge and the arena floor
    pub const PAD_BOTTOM_MARGIN: f32 = 40.0;
    pub const PAD_MIN_WIDTH: f32 = 20.0;
    pub const PAD_MIN_HEIGHT: f32 = 8.0;

    /// Frog defaults
    pub const FROG_MAX_VX: f32 = 12.0;
    pub const FROG_SPAWN_Y: f32 = 10.0;
    /// Spawn centers stay this far from either wall
    pub const FROG_SPAWN_MARGIN: i32 = 20;
    /// A frog whose bottom passes `ARENA_HEIGHT - WATER_MARGIN` is in the water
    pub const WATER_MARGIN: f32 = 10.0;
    /// Bounce speeds never drop below this floor
    pub const MIN_BOUNCE_SPEED: i32 = 3;

    /// Wind gust modulation
    pub const WIND_GUST_FREQUENCY: f32 = 1.2;
    pub const WIND_AMPLITUDE_RATIO: f32 = 0.5;

    /// Lives at session start
    pub const START_LIVES: u8 = 5;
}
