//! Background music selection
//!
//! The audio device itself lives outside the game; a [`MusicBackend`] wraps
//! it. Without a backend, or when the backend fails, music is silently off.

use std::path::{Path, PathBuf};

/// Playback volume when not muted
pub const MUSIC_VOLUME: f32 = 0.5;

/// Audio output device able to loop one track
pub trait MusicBackend {
    /// Load a track, replacing whatever was loaded
    fn load(&mut self, path: &Path) -> Result<(), String>;
    /// Start looping the loaded track
    fn play_looping(&mut self) -> Result<(), String>;
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
    /// Volume in 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Backend that accepts every command and produces no sound
#[derive(Debug, Default)]
pub struct NullBackend {
    loaded: Option<PathBuf>,
    playing: bool,
    volume: f32,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MusicBackend for NullBackend {
    fn load(&mut self, path: &Path) -> Result<(), String> {
        self.loaded = Some(path.to_path_buf());
        self.playing = false;
        Ok(())
    }

    fn play_looping(&mut self) -> Result<(), String> {
        if self.loaded.is_none() {
            return Err("no track loaded".to_string());
        }
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Picks and drives the background track for the active skin
pub struct MusicDirector {
    backend: Option<Box<dyn MusicBackend>>,
    /// Track used when a skin has no music of its own
    fallback_track: Option<PathBuf>,
    current: Option<PathBuf>,
    muted: bool,
}

impl MusicDirector {
    pub fn new(backend: Option<Box<dyn MusicBackend>>, fallback_track: Option<PathBuf>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - music disabled");
        }
        Self {
            backend,
            fallback_track,
            current: None,
            muted: false,
        }
    }

    /// Director with music permanently off
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { MUSIC_VOLUME }
    }

    /// Track to play for a skin: its own music, else the fallback if it exists
    pub fn target_for(&self, skin_music: Option<&Path>) -> Option<PathBuf> {
        skin_music.map(Path::to_path_buf).or_else(|| {
            self.fallback_track
                .as_ref()
                .filter(|path| path.is_file())
                .cloned()
        })
    }

    /// Switch to the skin's track, reloading only if the track changed
    pub fn play_for_skin(&mut self, skin_music: Option<&Path>) {
        let target = self.target_for(skin_music);
        let volume = self.volume();
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let Some(target) = target else {
            backend.stop();
            self.current = None;
            return;
        };

        if self.current.as_ref() != Some(&target) {
            backend.stop();
            if let Err(e) = backend.load(&target) {
                log::warn!("Music load issue ({}): {e}", target.display());
                self.current = None;
                return;
            }
            log::info!("Music: {}", target.display());
            self.current = Some(target);
        }

        if !backend.is_playing() {
            if let Err(e) = backend.play_looping() {
                log::warn!("Music playback failed: {e}");
                return;
            }
        }
        backend.set_volume(volume);
    }

    /// Flip mute; returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        let volume = self.volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_volume(volume);
        }
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Backend that records every call
    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        playing: bool,
        fail_load: bool,
    }

    impl MusicBackend for Recorder {
        fn load(&mut self, path: &Path) -> Result<(), String> {
            self.log.borrow_mut().push(format!("load {}", path.display()));
            if self.fail_load {
                return Err("unsupported format".to_string());
            }
            self.playing = false;
            Ok(())
        }

        fn play_looping(&mut self) -> Result<(), String> {
            self.log.borrow_mut().push("play".to_string());
            self.playing = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.log.borrow_mut().push("stop".to_string());
            self.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn set_volume(&mut self, volume: f32) {
            self.log.borrow_mut().push(format!("volume {volume}"));
        }
    }

    fn director(fallback: Option<PathBuf>) -> (MusicDirector, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            log: Rc::clone(&log),
            ..Default::default()
        };
        (MusicDirector::new(Some(Box::new(backend)), fallback), log)
    }

    #[test]
    fn test_reloads_only_on_track_change() {
        let (mut music, log) = director(None);
        music.play_for_skin(Some(Path::new("a.mp3")));
        music.play_for_skin(Some(Path::new("a.mp3")));
        assert_eq!(
            log.borrow().iter().filter(|l| l.starts_with("load")).count(),
            1
        );

        music.play_for_skin(Some(Path::new("b.ogg")));
        assert_eq!(music.current_track(), Some(Path::new("b.ogg")));
        assert!(log.borrow().contains(&"load b.ogg".to_string()));
    }

    #[test]
    fn test_no_track_stops() {
        let (mut music, log) = director(Some(PathBuf::from("/definitely/missing.mp3")));
        music.play_for_skin(Some(Path::new("a.mp3")));
        music.play_for_skin(None);
        assert_eq!(music.current_track(), None);
        assert_eq!(log.borrow().last().map(String::as_str), Some("stop"));
    }

    #[test]
    fn test_fallback_track_used_when_present() {
        let tmp = TempDir::new().unwrap();
        let fallback = tmp.path().join("music.mp3");
        std::fs::write(&fallback, b"").unwrap();

        let (mut music, _log) = director(Some(fallback.clone()));
        music.play_for_skin(None);
        assert_eq!(music.current_track(), Some(fallback.as_path()));
    }

    #[test]
    fn test_mute_sets_volume() {
        let (mut music, log) = director(None);
        music.play_for_skin(Some(Path::new("a.mp3")));
        assert_eq!(log.borrow().last().map(String::as_str), Some("volume 0.5"));

        assert!(music.toggle_mute());
        assert_eq!(log.borrow().last().map(String::as_str), Some("volume 0"));
        assert!(!music.toggle_mute());
    }

    #[test]
    fn test_load_failure_leaves_music_off() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            log: Rc::clone(&log),
            fail_load: true,
            ..Default::default()
        };
        let mut music = MusicDirector::new(Some(Box::new(backend)), None);
        music.play_for_skin(Some(Path::new("broken.m4a")));
        assert_eq!(music.current_track(), None);
        assert!(!log.borrow().contains(&"play".to_string()));
    }

    #[test]
    fn test_disabled_is_silent() {
        let mut music = MusicDirector::disabled();
        assert!(!music.is_enabled());
        music.play_for_skin(Some(Path::new("a.mp3")));
        assert_eq!(music.current_track(), None);
        assert!(music.toggle_mute());
    }
}
