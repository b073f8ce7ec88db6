use std::env;
use std::path::Path;

use tracing::info;

use crate::config;
use crate::library::{self, TrackItem};

/// Pick the playlist: a playlist file or directory given on the command
/// line, else the configured items, else a scan of the working directory.
pub fn resolve_items(
    arg: Option<&str>,
    settings: &config::Settings,
) -> Result<Vec<TrackItem>, Box<dyn std::error::Error>> {
    if let Some(arg) = arg {
        let path = Path::new(arg);
        if path.is_dir() {
            let items = library::scan(path, &settings.library);
            info!(dir = %path.display(), tracks = items.len(), "scanned directory");
            return Ok(items);
        }
        let items = library::load_playlist_file(path)?;
        info!(file = %path.display(), tracks = items.len(), "loaded playlist file");
        return Ok(items);
    }

    if !settings.items.is_empty() {
        info!(tracks = settings.items.len(), "using configured playlist");
        return Ok(settings.items.clone());
    }

    let dir = env::current_dir()?;
    let items = library::scan(&dir, &settings.library);
    info!(dir = %dir.display(), tracks = items.len(), "scanned working directory");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolve_items_prefers_the_command_line() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.mp3"), b"x").unwrap();
        let list = dir.path().join("list.toml");
        fs::write(&list, "[[items]]\nname = \"From file\"\n").unwrap();

        let mut settings = config::Settings::default();
        settings.items = vec![TrackItem::new("Configured")];

        let scanned = resolve_items(dir.path().to_str(), &settings).unwrap();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].name, "one");

        let listed = resolve_items(list.to_str(), &settings).unwrap();
        assert_eq!(listed, vec![TrackItem::new("From file")]);

        let configured = resolve_items(None, &settings).unwrap();
        assert_eq!(configured, vec![TrackItem::new("Configured")]);
    }

    #[test]
    fn resolve_items_fails_on_a_missing_playlist_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let settings = config::Settings::default();
        assert!(resolve_items(missing.to_str(), &settings).is_err());
    }
}
