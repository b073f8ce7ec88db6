use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::TrackItem;

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// `Artist - Title`, or just the title.
pub(super) fn display_name(item: &TrackItem) -> String {
    match item.artist.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => format!("{} - {}", a, item.name),
        _ => item.name.clone(),
    }
}

fn read_item(path: &Path) -> TrackItem {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN");
    let mut item = TrackItem::new(stem).with_source(path.to_string_lossy());

    let Ok(tagged) = lofty::read_from_path(path) else {
        return item;
    };

    let seconds = tagged.properties().duration().as_secs_f64();
    if seconds > 0.0 {
        item.duration = Some(seconds);
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = tag.title().filter(|t| !t.trim().is_empty()) {
            item.name = title.trim().to_string();
        }
        if let Some(artist) = tag.artist().filter(|a| !a.trim().is_empty()) {
            item.artist = Some(artist.trim().to_string());
        }
    }

    item
}

/// Collect playable items under `dir`, sorted case-insensitively by
/// display name.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<TrackItem> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut items: Vec<TrackItem> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file() && is_audio_file(e.path(), settings))
        .map(|e| read_item(e.path()))
        .collect();

    items.sort_by_cached_key(|item| display_name(item).to_lowercase());
    items
}
