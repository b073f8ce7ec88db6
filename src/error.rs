//! Error types surfaced by the playback controller.

use thiserror::Error;

/// Errors raised by the playlist and player.
///
/// Engine failures are not represented here: they are absorbed by the
/// player and turned into display state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    /// The render surface could not bind the configured container.
    #[error("player container {0:?} not found")]
    ContainerNotFound(String),

    /// Navigation was requested on a playlist without a playable track.
    #[error("playlist has no playable track")]
    NoPlayableTrack,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
