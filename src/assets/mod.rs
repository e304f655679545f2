//! Skin and asset discovery
//!
//! - `resolver`: fuzzy filename lookup against a directory snapshot
//! - `skin`: loading one skin folder, generated fallback art
//! - `catalog`: the ordered set of skins and the active selection

pub mod catalog;
pub mod resolver;
pub mod skin;

pub use catalog::SkinCatalog;
pub use resolver::{AUDIO_EXTENSIONS, AssetRole, DirListing, IMAGE_EXTENSIONS, find};
pub use skin::{
    FALLBACK_SKIN_NAME, ImageHandle, LEVELS_FILE, SHARED_LIFE_ICONS, Shape, Skin, default_life_icon,
    shared_life_icon,
};
