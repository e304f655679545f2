//! Fuzzy keyword-based asset lookup
//!
//! Skin folders are hand-assembled, so file names vary ("Lily Pad.png",
//! "lilypad.bmp", "pad_autumn.jpg"). Each asset role has an ordered list of
//! keyword sets; the first set that matches any file decides the result.

use std::fs;
use std::path::{Path, PathBuf};

use glam::UVec2;

/// Image extensions, in preference order
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "jpg", "jpeg"];
/// Audio extensions, in preference order
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "wav", "flac", "m4a"];

/// What an asset is used for within a skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRole {
    Background,
    Pad,
    Frog,
    LifeIcon,
    Music,
}

impl AssetRole {
    pub const ALL: [AssetRole; 5] = [
        AssetRole::Background,
        AssetRole::Pad,
        AssetRole::Frog,
        AssetRole::LifeIcon,
        AssetRole::Music,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetRole::Background => "background",
            AssetRole::Pad => "pad",
            AssetRole::Frog => "frog",
            AssetRole::LifeIcon => "life icon",
            AssetRole::Music => "music",
        }
    }

    /// Candidate keyword sets, highest priority first
    pub fn keyword_sets(&self) -> &'static [&'static [&'static str]] {
        match self {
            AssetRole::Background => &[&["bg"], &["background"]],
            AssetRole::Pad => &[&["lily", "pad"], &["lilypad"], &["pad"], &["platform"]],
            AssetRole::Frog => &[
                &["frog_bigeye"],
                &["frog", "bigeye"],
                &["frog"],
                &["ball"],
                &["character"],
                &["player"],
            ],
            AssetRole::LifeIcon => &[&["frog", "wave"], &["life"], &["heart"]],
            AssetRole::Music => &[&["music"], &["bgm"], &["background", "music"]],
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetRole::Music => AUDIO_EXTENSIONS,
            _ => IMAGE_EXTENSIONS,
        }
    }

    /// A skin without every required role is left out of the catalog
    pub fn is_required(&self) -> bool {
        matches!(self, AssetRole::Background | AssetRole::Pad | AssetRole::Frog)
    }

    /// Size assumed for an image whose header can't be read (zero for audio)
    pub fn default_size(&self) -> UVec2 {
        match self {
            AssetRole::Background => UVec2::new(640, 480),
            AssetRole::Pad => UVec2::new(120, 24),
            AssetRole::Frog => UVec2::new(40, 40),
            AssetRole::LifeIcon => UVec2::new(24, 24),
            AssetRole::Music => UVec2::ZERO,
        }
    }
}

/// Snapshot of the regular files in one directory
///
/// Lookups run against the snapshot, so resolving every role of a skin costs
/// a single directory read.
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    dir: PathBuf,
    files: Vec<String>,
}

impl DirListing {
    /// List `dir` (non-recursive); unreadable directories give an empty listing
    pub fn read(dir: &Path) -> Self {
        let files = match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .collect(),
            Err(e) => {
                log::debug!("Can't list {}: {e}", dir.display());
                Vec::new()
            }
        };
        Self::from_names(dir, files)
    }

    /// Build a listing from known file names
    pub fn from_names<I, S>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = names.into_iter().map(Into::into).collect();
        files.sort();
        Self {
            dir: dir.to_path_buf(),
            files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve the first keyword set that matches any file
    ///
    /// Within one keyword set, ties are broken by extension rank (order of
    /// `extensions`) and then by file name. Later sets are only tried when an
    /// earlier set matched nothing.
    pub fn find(&self, candidates: &[&[&str]], extensions: &[&str]) -> Option<PathBuf> {
        candidates.iter().find_map(|keywords| {
            self.files
                .iter()
                .filter_map(|name| {
                    let rank = extension_rank(name, extensions)?;
                    stem_matches(name, keywords).then_some((rank, name))
                })
                .min()
                .map(|(_, name)| self.dir.join(name))
        })
    }

    pub fn find_role(&self, role: AssetRole) -> Option<PathBuf> {
        let found = self.find(role.keyword_sets(), role.extensions());
        log::debug!(
            "{} in {}: {:?}",
            role.as_str(),
            self.dir.display(),
            found.as_deref().and_then(Path::file_name)
        );
        found
    }
}

/// One-shot lookup that lists `dir` and resolves against it
pub fn find(dir: &Path, candidates: &[&[&str]], extensions: &[&str]) -> Option<PathBuf> {
    DirListing::read(dir).find(candidates, extensions)
}

/// Position of the file's extension in `extensions`, case-insensitive
fn extension_rank(name: &str, extensions: &[&str]) -> Option<usize> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    extensions.iter().position(|e| e.eq_ignore_ascii_case(&ext))
}

fn strip_separators(s: &str) -> String {
    s.chars().filter(|c| *c != ' ' && *c != '_').collect()
}

/// Every keyword must appear in the lowercase stem or its separator-free form
fn stem_matches(name: &str, keywords: &[&str]) -> bool {
    let Some(stem) = Path::new(name).file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let stem = stem.to_lowercase();
    let compact = strip_separators(&stem);

    keywords.iter().all(|keyword| {
        let keyword = keyword.to_lowercase();
        stem.contains(&keyword) || compact.contains(&strip_separators(&keyword))
    })
}
