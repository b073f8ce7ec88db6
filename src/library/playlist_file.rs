use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::TrackItem;

#[derive(Debug, Error)]
pub enum PlaylistFileError {
    #[error("cannot read playlist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid playlist {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlaylistFile {
    items: Vec<TrackItem>,
}

/// Parse a TOML playlist (`[[items]]` tables).
pub fn parse_playlist(text: &str) -> Result<Vec<TrackItem>, toml::de::Error> {
    let file: PlaylistFile = toml::from_str(text)?;
    Ok(file.items)
}

/// Read a playlist file. Relative sources are resolved against the
/// directory holding the file.
pub fn load_playlist_file(path: &Path) -> Result<Vec<TrackItem>, PlaylistFileError> {
    let text = fs::read_to_string(path).map_err(|source| PlaylistFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut items = parse_playlist(&text).map_err(|source| PlaylistFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for item in &mut items {
        if let Some(source) = item.source.as_mut() {
            let candidate = Path::new(source.as_str());
            if candidate.is_relative() && !source.contains("://") && !source.trim().is_empty() {
                *source = base.join(candidate).to_string_lossy().into_owned();
            }
        }
    }

    Ok(items)
}
