//! Sink construction over in-memory audio data.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

/// Create a paused `Sink` over `data` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    data: Arc<[u8]>,
    start_at: Duration,
) -> Result<Sink, String> {
    let source = Decoder::new(Cursor::new(data))
        .map_err(|e| format!("failed to decode: {e}"))?
        // Seeking is a skip from the start of the stream.
        .skip_duration(start_at);

    let sink = Sink::connect_new(mixer);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
