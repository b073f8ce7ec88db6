//! Embeddable playlist playback controller.
//!
//! A [`player::Player`] drives an ordered playlist through a pluggable
//! [`engine::SoundEngine`] and mirrors its state onto a
//! [`surface::RenderSurface`]. The `reprise` binary wires it to `rodio` and
//! a `ratatui` terminal UI.

pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod library;
pub mod player;
pub mod playlist;
pub mod runtime;
pub mod surface;
pub mod track;
pub mod ui;
