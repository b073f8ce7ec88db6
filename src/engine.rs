//! Sound engine port and the `rodio` adapter.
//!
//! The player never talks to an audio backend directly: it creates one
//! [`SoundHandle`] per track through a [`SoundEngine`] and learns about
//! asynchronous progress (load finished, playback started, end of track,
//! failures) through a [`Notifier`] bound to the track.

mod device;
mod sink;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use device::{RodioEngine, RodioHandle};
pub use types::*;
