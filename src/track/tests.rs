use std::rc::Rc;
use std::sync::mpsc;

use super::*;
use crate::analytics::recording::RecordingAnalytics;
use crate::engine::fake::{Command, FakeEngine};
use crate::engine::{EngineEvent, EngineNotice, Notifier, SoundEngine};

struct Rig {
    engine: FakeEngine,
    analytics: Rc<RecordingAnalytics>,
    rx: mpsc::Receiver<EngineNotice>,
    track: Track,
}

fn rig(item: TrackItem) -> Rig {
    let mut engine = FakeEngine::new();
    let analytics = Rc::new(RecordingAnalytics::default());
    let (tx, rx) = mpsc::channel();
    let mut track = Track::new(0, item, Analytics::new(analytics.clone()));
    if let Some(source) = track.source().map(str::to_owned) {
        track.attach_sound(engine.create(&source, Notifier::new(0, tx)));
    }
    Rig {
        engine,
        analytics,
        rx,
        track,
    }
}

fn song() -> TrackItem {
    TrackItem::new("Song").with_artist("Artist").with_source("song.mp3")
}

fn loaded_and_playing() -> Rig {
    let mut r = rig(song());
    r.track.play();
    r.engine.finish_load(0);
    assert!(r.track.mark_loaded());
    r.track.play();
    r
}

#[test]
fn format_time_pads_and_does_not_roll_into_hours() {
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(65.0), "01:05");
    assert_eq!(format_time(3661.0), "61:01");
    assert_eq!(format_time(59.9), "00:59");
    assert_eq!(format_time(-3.0), "00:00");
    assert_eq!(format_time(f64::NAN), "00:00");
}

#[test]
fn track_without_source_stays_in_no_sound() {
    let mut r = rig(TrackItem::new("Chapter 1"));
    assert!(!r.track.is_playable());
    r.track.play();
    r.track.pause();
    r.track.stop();
    r.track.seek(10.0);
    assert_eq!(r.track.state(), PlaybackState::NoSound);
    assert_eq!(r.engine.created(), 0);
}

#[test]
fn blank_source_is_not_playable() {
    let track = Track::new(3, TrackItem::new("x").with_source("  "), Analytics::disabled());
    assert!(!track.is_playable());
}

#[test]
fn attaching_a_second_sound_keeps_the_first() {
    let mut r = rig(song());
    let (tx, _rx) = mpsc::channel();
    r.track
        .attach_sound(r.engine.create("other.mp3", Notifier::new(1, tx)));
    r.track.play();
    assert_eq!(r.engine.commands(0), vec![Command::Load]);
    assert!(r.engine.commands(1).is_empty());
}

#[test]
fn first_play_requests_a_load_and_waits_for_it() {
    let mut r = rig(song());
    assert_eq!(r.track.state(), PlaybackState::Unloaded);

    r.track.play();
    assert_eq!(
        r.track.state(),
        PlaybackState::Loading {
            play_when_loaded: true
        }
    );
    assert!(r.track.is_playing());
    assert!(r.track.is_loading());
    assert_eq!(r.engine.commands(0), vec![Command::Load]);
    assert!(r.analytics.actions().is_empty());
}

#[test]
fn load_completion_starts_a_fresh_play_and_reports_it() {
    let r = loaded_and_playing();
    assert_eq!(r.track.state(), PlaybackState::Playing);
    assert_eq!(r.engine.commands(0), vec![Command::Load, Command::Play(None)]);
    assert_eq!(
        r.analytics.events(),
        vec![(
            "player".to_string(),
            "play".to_string(),
            "Artist - Song".to_string()
        )]
    );

    let notices: Vec<_> = r.rx.try_iter().map(|n| n.event).collect();
    assert_eq!(notices, vec![EngineEvent::Loaded, EngineEvent::PlayStarted]);
}

#[test]
fn pausing_while_loading_cancels_the_pending_play() {
    let mut r = rig(song());
    r.track.play();
    r.track.pause();
    assert!(!r.track.is_playing());
    r.engine.finish_load(0);
    assert!(!r.track.mark_loaded());
    assert_eq!(r.track.state(), PlaybackState::Stopped);
}

#[test]
fn resume_after_pause_does_not_report_play_again() {
    let mut r = loaded_and_playing();
    r.track.pause();
    assert_eq!(r.track.state(), PlaybackState::Paused);
    r.track.play();
    assert_eq!(r.track.state(), PlaybackState::Playing);

    assert_eq!(r.analytics.actions(), vec!["play", "pause"]);
    assert_eq!(
        r.engine.commands(0),
        vec![
            Command::Load,
            Command::Play(None),
            Command::Pause(Some(7)),
            Command::Play(Some(7)),
        ]
    );
}

#[test]
fn play_after_stop_is_a_fresh_start() {
    let mut r = loaded_and_playing();
    r.track.stop();
    assert_eq!(r.track.state(), PlaybackState::Stopped);
    r.track.play();
    assert_eq!(r.analytics.actions(), vec!["play", "play"]);
}

#[test]
fn stopping_a_load_aborts_it() {
    let mut r = rig(song());
    r.track.play();
    r.track.stop();
    assert_eq!(r.track.state(), PlaybackState::Unloaded);
    assert_eq!(r.engine.commands(0), vec![Command::Load, Command::Unload]);

    // A late notice no longer applies.
    assert!(!r.track.mark_loaded());
    assert_eq!(r.track.state(), PlaybackState::Unloaded);
}

#[test]
fn seek_only_reaches_the_engine_while_playing() {
    let mut r = rig(song());
    r.track.seek(12.0);
    r.track.play();
    r.track.seek(12.0);
    assert!(!r.engine.commands(0).contains(&Command::Seek(12.0)));

    let mut r = loaded_and_playing();
    r.track.seek(12.0);
    assert!(r.engine.commands(0).contains(&Command::Seek(12.0)));
    assert_eq!(r.analytics.actions(), vec!["play", "seek"]);

    r.track.pause();
    r.track.seek(30.0);
    assert!(!r.engine.commands(0).contains(&Command::Seek(30.0)));
}

#[test]
fn end_of_track_returns_to_stopped() {
    let mut r = loaded_and_playing();
    r.track.finish();
    assert_eq!(r.track.state(), PlaybackState::Stopped);
    assert!(!r.track.is_playing());
}

#[test]
fn failed_load_marks_error_and_play_retries_the_load() {
    let mut r = rig(song());
    r.track.play();
    r.engine.fail_load(0);
    r.track.fail();
    assert_eq!(r.track.state(), PlaybackState::Error);
    assert!(!r.track.is_playing());

    r.track.play();
    assert!(r.track.is_loading());
    assert_eq!(r.engine.commands(0), vec![Command::Load, Command::Load]);
}

#[test]
fn failed_play_on_loaded_sound_restarts_without_reloading() {
    let mut r = loaded_and_playing();
    r.track.fail();
    assert_eq!(r.track.state(), PlaybackState::Error);
    r.track.play();
    assert_eq!(r.track.state(), PlaybackState::Playing);
    assert_eq!(
        r.engine.commands(0),
        vec![
            Command::Load,
            Command::Play(None),
            Command::Stop(Some(7)),
            Command::Play(Some(7)),
        ]
    );
}

#[test]
fn duration_prefers_declared_value() {
    let r = rig(song().with_duration(215.0));
    r.engine.set_duration(0, 180.0);
    assert_eq!(r.track.duration(), 215.0);

    let r = rig(song());
    r.engine.set_duration(0, 180.0);
    assert_eq!(r.track.duration(), 180.0);

    let bare = Track::new(1, TrackItem::new("x"), Analytics::disabled());
    assert_eq!(bare.duration(), 0.0);
}

#[test]
fn seek_position_reads_the_engine() {
    let r = rig(song());
    r.engine.set_position(0, 65.4);
    assert_eq!(r.track.seek_position(), 65.4);
    assert_eq!(r.track.seek_text(), "01:05");

    let bare = Track::new(1, TrackItem::new("x"), Analytics::disabled());
    assert_eq!(bare.seek_position(), 0.0);
    assert_eq!(bare.seek_text(), ZERO_TIME);
}

#[test]
fn label_falls_back_to_name_without_artist() {
    let t = Track::new(0, TrackItem::new("Intro"), Analytics::disabled());
    assert_eq!(t.label(), "Intro");
    let t = Track::new(0, song(), Analytics::disabled());
    assert_eq!(t.label(), "Artist - Song");
}
