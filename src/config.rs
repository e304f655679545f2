//! Runtime configuration: where skins live and where player data goes

use std::path::{Path, PathBuf};

/// Default folder holding one sub-folder per skin
pub const DEFAULT_SKINS_ROOT: &str = "assets/skins";
/// Default folder for settings and the leaderboard
pub const DEFAULT_DATA_DIR: &str = "Data";
/// Track played when a skin has no music of its own
pub const DEFAULT_FALLBACK_MUSIC: &str = "music.mp3";
/// Folder searched for the shared life icon
pub const DEFAULT_SHARED_ASSETS_DIR: &str = ".";

pub const SETTINGS_FILE: &str = "settings.json";
pub const SCORES_FILE: &str = "scores.json";

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub skins_root: PathBuf,
    pub data_dir: PathBuf,
    pub fallback_music: PathBuf,
    pub shared_assets_dir: PathBuf,
    /// Seed for the first session; later sessions derive from it
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            skins_root: PathBuf::from(DEFAULT_SKINS_ROOT),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fallback_music: PathBuf::from(DEFAULT_FALLBACK_MUSIC),
            shared_assets_dir: PathBuf::from(DEFAULT_SHARED_ASSETS_DIR),
            seed: 0,
        }
    }
}

impl GameConfig {
    pub fn paths(&self) -> DataPaths {
        DataPaths::in_dir(&self.data_dir)
    }
}

/// Locations of persisted player data
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub settings: PathBuf,
    pub scores: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            settings: dir.join(SETTINGS_FILE),
            scores: dir.join(SCORES_FILE),
        }
    }
}
