//! Skin catalog: discovery, selection and cycling

use std::fs;
use std::path::Path;

use super::skin::Skin;
use crate::settings::Settings;

/// All loadable skins under a root folder plus the active selection
///
/// Skins are ordered by folder name; that order is the cycling order.
#[derive(Debug, Clone)]
pub struct SkinCatalog {
    skins: Vec<Skin>,
    active: usize,
    auto_cycle: bool,
}

impl Default for SkinCatalog {
    fn default() -> Self {
        Self {
            skins: Vec::new(),
            active: 0,
            auto_cycle: true,
        }
    }
}

impl SkinCatalog {
    /// Load every qualifying skin folder directly under `root`
    ///
    /// A missing or unreadable root gives an empty list.
    pub fn scan(root: &Path) -> Vec<Skin> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Can't read skins root {}: {e}", root.display());
                return Vec::new();
            }
        };

        let mut dirs: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        dirs.iter().filter_map(|dir| Skin::load(dir)).collect()
    }

    /// Load the catalog and restore the persisted selection
    pub fn load(root: &Path, settings: &Settings) -> Self {
        let mut catalog = Self::from_skins(Self::scan(root));
        catalog.auto_cycle = settings.auto_cycle;
        if let Some(name) = settings.skin_name.as_deref() {
            if !catalog.select_by_name(name) {
                log::info!("Saved skin `{name}` not found, using first skin");
            }
        }
        log::info!("Loaded {} skin(s) from {}", catalog.len(), root.display());
        catalog
    }

    /// Load, synthesizing the fallback skin if nothing qualified
    pub fn load_or_fallback(root: &Path, settings: &Settings) -> Self {
        let mut catalog = Self::load(root, settings);
        catalog.ensure_fallback();
        catalog
    }

    pub fn from_skins(skins: Vec<Skin>) -> Self {
        Self {
            skins,
            ..Self::default()
        }
    }

    /// Insert the generated fallback skin into an empty catalog
    ///
    /// Returns true if the fallback was added.
    pub fn ensure_fallback(&mut self) -> bool {
        if !self.skins.is_empty() {
            return false;
        }
        log::warn!("No usable skins found, using generated fallback art");
        self.skins.push(Skin::fallback());
        self.active = 0;
        true
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> Option<&Skin> {
        self.skins.get(self.active)
    }

    /// Advance to the next skin, wrapping around
    pub fn next(&mut self) {
        if self.skins.is_empty() {
            return;
        }
        self.active = (self.active + 1) % self.skins.len();
    }

    /// Step back to the previous skin, wrapping around
    pub fn previous(&mut self) {
        if self.skins.is_empty() {
            return;
        }
        self.active = (self.active + self.skins.len() - 1) % self.skins.len();
    }

    /// Select a skin by name; falls back to the first skin if it isn't present
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.skins.iter().position(|s| s.name == name) {
            Some(index) => {
                self.active = index;
                true
            }
            None => {
                self.active = 0;
                false
            }
        }
    }

    pub fn auto_cycle(&self) -> bool {
        self.auto_cycle
    }

    pub fn set_auto_cycle(&mut self, enabled: bool) {
        self.auto_cycle = enabled;
    }

    /// Copy the current selection into a settings record
    pub fn write_choice(&self, settings: &mut Settings) {
        if let Some(skin) = self.current() {
            settings.skin_name = Some(skin.name.clone());
        }
        settings.auto_cycle = self.auto_cycle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::skin::FALLBACK_SKIN_NAME;
    use tempfile::TempDir;

    fn make_skin(root: &Path, name: &str, files: &[&str]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"").unwrap();
        }
    }

    const FULL: &[&str] = &["bg.png", "pad.png", "frog.png"];

    fn names(catalog: &SkinCatalog) -> Vec<&str> {
        catalog.skins().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_scan_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        make_skin(tmp.path(), "winter", FULL);
        make_skin(tmp.path(), "autumn", FULL);
        make_skin(tmp.path(), "broken", &["bg.png", "frog.png"]);
        make_skin(tmp.path(), "spring", &["background.jpg", "platform.bmp", "player.png"]);
        fs::write(tmp.path().join("stray.png"), b"").unwrap();

        let catalog = SkinCatalog::load(tmp.path(), &Settings::default());
        assert_eq!(names(&catalog), vec!["autumn", "spring", "winter"]);
        assert_eq!(catalog.active_index(), 0);
        assert!(catalog.auto_cycle());
    }

    #[test]
    fn test_restore_persisted_choice() {
        let tmp = TempDir::new().unwrap();
        make_skin(tmp.path(), "autumn", FULL);
        make_skin(tmp.path(), "winter", FULL);

        let settings = Settings {
            skin_name: Some("winter".to_string()),
            auto_cycle: false,
            ..Settings::default()
        };
        let catalog = SkinCatalog::load(tmp.path(), &settings);
        assert_eq!(catalog.current().map(|s| s.name.as_str()), Some("winter"));
        assert!(!catalog.auto_cycle());

        let stale = Settings {
            skin_name: Some("summer".to_string()),
            ..Settings::default()
        };
        let catalog = SkinCatalog::load(tmp.path(), &stale);
        assert_eq!(catalog.active_index(), 0);
    }

    #[test]
    fn test_empty_root_yields_single_fallback() {
        let tmp = TempDir::new().unwrap();
        make_skin(tmp.path(), "incomplete", &["bg.png"]);

        let catalog = SkinCatalog::load_or_fallback(tmp.path(), &Settings::default());
        assert_eq!(catalog.len(), 1);
        assert_eq!(names(&catalog), vec![FALLBACK_SKIN_NAME]);

        let missing = tmp.path().join("does-not-exist");
        let catalog = SkinCatalog::load_or_fallback(&missing, &Settings::default());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_ensure_fallback_noop_when_populated() {
        let mut catalog = SkinCatalog::from_skins(vec![Skin::fallback(), Skin::fallback()]);
        assert!(!catalog.ensure_fallback());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_cycling_wraps() {
        let mut catalog = SkinCatalog::from_skins(vec![Skin::fallback(); 3]);
        catalog.previous();
        assert_eq!(catalog.active_index(), 2);
        catalog.next();
        assert_eq!(catalog.active_index(), 0);
        catalog.next();
        catalog.next();
        catalog.next();
        assert_eq!(catalog.active_index(), 0);
    }

    #[test]
    fn test_cycling_empty_is_noop() {
        let mut catalog = SkinCatalog::default();
        catalog.next();
        catalog.previous();
        assert_eq!(catalog.active_index(), 0);
        assert!(catalog.current().is_none());
    }

    #[test]
    fn test_write_choice() {
        let mut skin = Skin::fallback();
        skin.name = "pond".to_string();
        let mut catalog = SkinCatalog::from_skins(vec![Skin::fallback(), skin]);
        catalog.next();
        catalog.set_auto_cycle(false);

        let mut settings = Settings::default();
        catalog.write_choice(&mut settings);
        assert_eq!(settings.skin_name.as_deref(), Some("pond"));
        assert!(!settings.auto_cycle);
    }
}
