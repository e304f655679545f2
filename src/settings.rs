//! Persisted player choices
//!
//! Stored as JSON next to the leaderboard. Keys this version doesn't know
//! about are carried through a save untouched.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::persistence;

fn default_auto_cycle() -> bool {
    true
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Last confirmed skin, restored by name on the next catalog load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_name: Option<String>,
    /// Advance to the next skin whenever the level changes
    #[serde(default = "default_auto_cycle")]
    pub auto_cycle: bool,
    /// Unrecognized keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin_name: None,
            auto_cycle: true,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Load settings; a missing or corrupt file yields defaults
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Re-read the stored record, apply `update`, and write it back
    pub fn update(path: &Path, update: impl FnOnce(&mut Settings)) -> io::Result<Settings> {
        let mut settings = Self::load(path);
        update(&mut settings);
        settings.save(path)?;
        Ok(settings)
    }
}
