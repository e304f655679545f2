//! JSON document persistence
//!
//! Features:
//! - Tolerant reads: absent or corrupt documents read as `None` / default
//! - Atomic-ish writes (tmp file then rename over the target)
//! - Parent directories created on demand

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and parse a JSON document, `None` if it is missing or malformed
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                log::debug!("Can't read {}: {e}", path.display());
            }
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {e}", path.display());
            None
        }
    }
}

/// Write pretty JSON via `<path>.tmp` and rename it over `path`
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, json)?;
    fs::rename(tmp, path)
}
