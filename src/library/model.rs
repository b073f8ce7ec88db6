use serde::Deserialize;

/// One playlist entry as supplied by configuration, a playlist file or a
/// directory scan.
///
/// An item without `source` is display-only (a chapter header, a track that
/// is listed but not streamable).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackItem {
    pub name: String,
    pub artist: Option<String>,
    /// Duration in seconds, when known up front.
    pub duration: Option<f64>,
    #[serde(alias = "src")]
    pub source: Option<String>,
}

impl TrackItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }
}
