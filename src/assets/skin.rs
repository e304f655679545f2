//! Skins: named bundles of art, music and level configuration

use std::path::{Path, PathBuf};

use glam::UVec2;
use serde_json::Value;

use super::resolver::{AssetRole, DirListing};
use crate::persistence;

/// Conventional level configuration file inside a skin folder
pub const LEVELS_FILE: &str = "levels.json";

/// Name of the synthesized skin used when no folder qualifies
pub const FALLBACK_SKIN_NAME: &str = "fallback";

/// Primitive shape for generated art
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Ellipse,
    Circle,
}

/// Handle to a piece of skin art
#[derive(Debug, Clone, PartialEq)]
pub enum ImageHandle {
    /// Image file on disk with its pixel size
    File { path: PathBuf, size: UVec2 },
    /// Solid-colour primitive, drawn in place of missing art
    Procedural {
        shape: Shape,
        color: [u8; 3],
        size: UVec2,
    },
}

impl ImageHandle {
    /// Wrap an image file, probing its header for the pixel size
    ///
    /// An unreadable header doesn't reject the file; the role's default size
    /// is assumed instead.
    pub fn from_file(path: PathBuf, role: AssetRole) -> Self {
        let size = match image::image_dimensions(&path) {
            Ok((w, h)) if w > 0 && h > 0 => UVec2::new(w, h),
            Ok(_) => role.default_size(),
            Err(e) => {
                log::debug!(
                    "Can't read size of {} ({e}), assuming {}",
                    path.display(),
                    role.default_size()
                );
                role.default_size()
            }
        };
        ImageHandle::File { path, size }
    }

    pub fn procedural(shape: Shape, color: [u8; 3], size: UVec2) -> Self {
        ImageHandle::Procedural { shape, color, size }
    }

    pub fn size(&self) -> UVec2 {
        match self {
            ImageHandle::File { size, .. } | ImageHandle::Procedural { size, .. } => *size,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageHandle::File { path, .. } => Some(path),
            ImageHandle::Procedural { .. } => None,
        }
    }
}

/// Shared life icon files, in lookup order
pub const SHARED_LIFE_ICONS: [&str; 2] = ["frog_wave.bmp", "life.bmp"];

/// Generated life icon
pub fn default_life_icon() -> ImageHandle {
    ImageHandle::procedural(Shape::Circle, [0, 180, 0], AssetRole::LifeIcon.default_size())
}

/// Life icon for skins without one: the first shared icon file in `dir`,
/// else the generated circle
pub fn shared_life_icon(dir: &Path) -> ImageHandle {
    let listing = DirListing::read(dir);
    SHARED_LIFE_ICONS
        .into_iter()
        .find(|name| listing.files().iter().any(|file| file == name))
        .map(|name| ImageHandle::from_file(dir.join(name), AssetRole::LifeIcon))
        .unwrap_or_else(default_life_icon)
}

/// A loaded skin
#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    /// Folder name; unique within a catalog
    pub name: String,
    pub background: ImageHandle,
    pub pad: ImageHandle,
    pub frog: ImageHandle,
    pub life_icon: Option<ImageHandle>,
    pub music: Option<PathBuf>,
    /// Raw level configuration, if the skin ships a readable one
    pub levels: Option<Value>,
}

impl Skin {
    /// Load a skin folder; `None` unless background, pad and frog art all resolve
    pub fn load(dir: &Path) -> Option<Self> {
        let name = dir.file_name()?.to_str()?.to_string();
        let listing = DirListing::read(dir);

        let load_image = |role: AssetRole| {
            listing
                .find_role(role)
                .map(|path| ImageHandle::from_file(path, role))
        };

        let (Some(background), Some(pad), Some(frog)) = (
            load_image(AssetRole::Background),
            load_image(AssetRole::Pad),
            load_image(AssetRole::Frog),
        ) else {
            let missing: Vec<_> = AssetRole::ALL
                .into_iter()
                .filter(|role| role.is_required() && listing.find_role(*role).is_none())
                .map(|role| role.as_str())
                .collect();
            log::debug!("Skipping skin `{name}`: missing {}", missing.join(", "));
            return None;
        };

        let life_icon = load_image(AssetRole::LifeIcon);
        let music = listing.find_role(AssetRole::Music);
        let levels = persistence::read_json::<Value>(&dir.join(LEVELS_FILE));

        Some(Self {
            name,
            background,
            pad,
            frog,
            life_icon,
            music,
            levels,
        })
    }

    /// Generated skin so the game stays playable without any assets
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_SKIN_NAME.to_string(),
            background: ImageHandle::procedural(
                Shape::Rect,
                [140, 180, 220],
                AssetRole::Background.default_size(),
            ),
            pad: ImageHandle::procedural(Shape::Ellipse, [40, 140, 60], AssetRole::Pad.default_size()),
            frog: ImageHandle::procedural(Shape::Circle, [0, 200, 0], AssetRole::Frog.default_size()),
            life_icon: None,
            music: None,
            levels: None,
        }
    }

    /// Life icon to draw, `shared` if the skin has none
    pub fn life_icon_or(&self, shared: &ImageHandle) -> ImageHandle {
        self.life_icon.clone().unwrap_or_else(|| shared.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn write_png(path: &Path, w: u32, h: u32) {
        image::RgbaImage::new(w, h).save(path).unwrap();
    }

    #[test]
    fn test_load_complete_skin() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("autumn");
        fs::create_dir(&dir).unwrap();
        write_png(&dir.join("lily pad.png"), 90, 18);
        touch(&dir, "bg.bmp");
        touch(&dir, "frog_bigeye.bmp");
        touch(&dir, "frog_wave.bmp");
        touch(&dir, "music.mp3");
        fs::write(dir.join(LEVELS_FILE), r#"{"levels": [{"score": 0, "frogs": 2}]}"#).unwrap();

        let skin = Skin::load(&dir).unwrap();
        assert_eq!(skin.name, "autumn");
        assert_eq!(skin.pad.size(), UVec2::new(90, 18));
        // Empty file: header unreadable, role default assumed
        assert_eq!(skin.frog.size(), AssetRole::Frog.default_size());
        assert_eq!(skin.frog.path(), Some(dir.join("frog_bigeye.bmp").as_path()));
        assert_eq!(
            skin.life_icon.as_ref().and_then(ImageHandle::path),
            Some(dir.join("frog_wave.bmp").as_path())
        );
        assert_eq!(skin.music, Some(dir.join("music.mp3")));
        assert!(skin.levels.is_some());
    }

    #[test]
    fn test_missing_required_art_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("winter");
        fs::create_dir(&dir).unwrap();
        touch(&dir, "bg.png");
        touch(&dir, "frog.png");
        touch(&dir, "music.ogg");

        assert_eq!(Skin::load(&dir), None);
    }

    #[test]
    fn test_malformed_levels_treated_as_absent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("night");
        fs::create_dir(&dir).unwrap();
        for name in ["bg.png", "pad.png", "ball.png"] {
            touch(&dir, name);
        }
        fs::write(dir.join(LEVELS_FILE), "[{\"score\": ").unwrap();

        let skin = Skin::load(&dir).unwrap();
        assert_eq!(skin.levels, None);
        assert_eq!(skin.music, None);
        assert_eq!(skin.life_icon, None);
        assert_eq!(skin.life_icon_or(&default_life_icon()), default_life_icon());
    }

    #[test]
    fn test_shared_life_icon_lookup_order() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(shared_life_icon(tmp.path()), default_life_icon());

        touch(tmp.path(), "life.bmp");
        let icon = shared_life_icon(tmp.path());
        assert_eq!(icon.path(), Some(tmp.path().join("life.bmp").as_path()));

        touch(tmp.path(), "frog_wave.bmp");
        let icon = shared_life_icon(tmp.path());
        assert_eq!(icon.path(), Some(tmp.path().join("frog_wave.bmp").as_path()));
        // Unreadable header: role default size
        assert_eq!(icon.size(), UVec2::new(24, 24));

        let missing = tmp.path().join("nowhere");
        assert_eq!(shared_life_icon(&missing), default_life_icon());
    }

    #[test]
    fn test_fallback_skin_is_procedural() {
        let skin = Skin::fallback();
        assert_eq!(skin.name, FALLBACK_SKIN_NAME);
        assert_eq!(skin.pad.size(), UVec2::new(120, 24));
        assert_eq!(skin.frog.size(), UVec2::new(40, 40));
        assert_eq!(skin.background.path(), None);
        assert!(matches!(
            skin.background,
            ImageHandle::Procedural { color: [140, 180, 220], .. }
        ));
    }
}
