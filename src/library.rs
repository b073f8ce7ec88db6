//! Where playlist items come from: configuration, playlist files and
//! directory scans.

mod model;
mod playlist_file;
mod scan;

pub use model::TrackItem;
pub use playlist_file::{PlaylistFileError, load_playlist_file, parse_playlist};
pub use scan::scan;
