//! Integration tests for the playback controller
//!
//! Drives the controller through the full session lifecycle with a paused
//! tokio clock (deterministic simulated time) and a scripted sink. Covers
//! the sequencing guarantees:
//! - cursor is monotonic and advances by exactly 1 per finished track
//! - at most one resolution in flight
//! - playing implies a resolved track
//! - pause suppresses auto-advance until an explicit play
//! - the terminal state is stable

mod helpers;

use helpers::{pass_resolve_delay, test_controller, SinkCall};
use seqplay_ap::session::Phase;
use seqplay_common::events::SessionEvent;

/// Scenario: a two-entry playlist plays through to completion
#[tokio::test(start_paused = true)]
async fn test_two_track_playlist_runs_to_completion() {
    let (controller, sink) = test_controller(2);

    controller.initialize().await;
    let snap = controller.state().snapshot(2).await;
    assert!(snap.started);
    assert!(snap.resolving);
    assert_eq!(snap.phase, Phase::Resolving);

    // First resolution completes, autoplay starts track 0
    pass_resolve_delay().await;
    let snap = controller.state().snapshot(2).await;
    assert_eq!(
        snap.resolved_src.as_ref().unwrap().as_str(),
        "https://example.com/0.mp3"
    );
    assert!(snap.playing);
    assert_eq!(snap.cursor, 0);

    // Track 0 finishes: cursor advances, resolution begins for track 1
    controller.on_track_finished().await;
    let snap = controller.state().snapshot(2).await;
    assert_eq!(snap.cursor, 1);
    assert!(snap.resolving);
    assert!(snap.resolved_src.is_none());
    assert!(!snap.playing);

    pass_resolve_delay().await;
    let snap = controller.state().snapshot(2).await;
    assert_eq!(
        snap.resolved_src.as_ref().unwrap().as_str(),
        "https://example.com/1.mp3"
    );
    assert!(snap.playing);

    // Track 1 finishes: playlist exhausted, session terminal
    controller.on_track_finished().await;
    let snap = controller.state().snapshot(2).await;
    assert!(snap.complete);
    assert!(!snap.playing);
    assert_eq!(snap.phase, Phase::Complete);
    assert_eq!(snap.cursor, 1);

    // Both tracks were loaded and played exactly once
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::Load("https://example.com/0.mp3".to_string()),
            SinkCall::Play,
            SinkCall::Load("https://example.com/1.mp3".to_string()),
            SinkCall::Play,
        ]
    );
}

/// Scenario: pause then resume keeps the cursor and toggles auto-advance
#[tokio::test(start_paused = true)]
async fn test_pause_and_resume_keep_cursor() {
    let (controller, _sink) = test_controller(3);
    controller.initialize().await;
    pass_resolve_delay().await;

    controller.pause().await.unwrap();
    let snap = controller.state().snapshot(3).await;
    assert!(!snap.playing);
    assert!(!snap.auto_advance);
    assert_eq!(snap.cursor, 0);
    assert_eq!(snap.phase, Phase::Paused);

    controller.play().await.unwrap();
    let snap = controller.state().snapshot(3).await;
    assert!(snap.playing);
    assert!(snap.auto_advance);
    assert_eq!(snap.cursor, 0);
}

/// Scenario: blocked autoplay keeps the resolved track; manual play retries
/// without re-resolving
#[tokio::test(start_paused = true)]
async fn test_blocked_autoplay_recovers_via_manual_play() {
    let (controller, sink) = test_controller(2);
    let mut events = controller.state().subscribe_events();

    sink.reject_next_play();
    controller.initialize().await;
    pass_resolve_delay().await;

    let snap = controller.state().snapshot(2).await;
    assert!(!snap.playing);
    // Track 0 stayed resolved: retry needs no new resolution
    assert_eq!(
        snap.resolved_src.as_ref().unwrap().as_str(),
        "https://example.com/0.mp3"
    );
    assert_eq!(snap.cursor, 0);
    assert!(!snap.resolving);

    let mut blocked = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, SessionEvent::PlaybackBlocked { index: 0, .. }) {
            blocked += 1;
        }
    }
    assert_eq!(blocked, 1);

    controller.play().await.unwrap();
    let snap = controller.state().snapshot(2).await;
    assert!(snap.playing);
    assert_eq!(sink.play_count(), 2);
}

/// Only one resolution is ever pending, and only initialize/track-finished
/// start one
#[tokio::test(start_paused = true)]
async fn test_single_resolution_in_flight() {
    let (controller, _sink) = test_controller(2);
    let mut events = controller.state().subscribe_events();

    controller.initialize().await;
    // Re-initialize and spurious finished notices must not start another
    controller.initialize().await;
    controller.on_track_finished().await;

    pass_resolve_delay().await;

    let mut resolving = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, SessionEvent::TrackResolving { .. }) {
            resolving += 1;
        }
    }
    assert_eq!(resolving, 1);
}

/// After pause, no resolution or playback-start occurs until explicit play
#[tokio::test(start_paused = true)]
async fn test_pause_suppresses_auto_advance() {
    let (controller, sink) = test_controller(3);
    controller.initialize().await;
    pass_resolve_delay().await;

    controller.pause().await.unwrap();
    let plays_before = sink.play_count();

    // A stray finished notice while paused must not advance or resolve
    controller.on_track_finished().await;
    pass_resolve_delay().await;

    let snap = controller.state().snapshot(3).await;
    assert_eq!(snap.cursor, 0);
    assert!(!snap.resolving);
    assert!(!snap.playing);
    assert_eq!(sink.play_count(), plays_before);
}

/// Once Complete, nothing moves the session again
#[tokio::test(start_paused = true)]
async fn test_terminal_state_is_stable() {
    let (controller, sink) = test_controller(1);
    controller.initialize().await;
    pass_resolve_delay().await;

    controller.on_track_finished().await;
    let snap = controller.state().snapshot(1).await;
    assert!(snap.complete);

    let plays_before = sink.play_count();
    controller.on_track_finished().await;
    controller.on_track_finished().await;
    pass_resolve_delay().await;

    let snap = controller.state().snapshot(1).await;
    assert!(snap.complete);
    assert_eq!(snap.cursor, 0);
    assert!(!snap.resolving);
    assert!(!snap.playing);
    assert_eq!(sink.play_count(), plays_before);

    // Manual play after completion is rejected
    assert!(controller.play().await.is_err());
}

/// Session events arrive in lifecycle order for a full run
#[tokio::test(start_paused = true)]
async fn test_event_sequence_for_full_run() {
    let (controller, _sink) = test_controller(1);
    let mut events = controller.state().subscribe_events();

    controller.initialize().await;
    pass_resolve_delay().await;
    controller.on_track_finished().await;

    let mut types = Vec::new();
    while let Ok(event) = events.try_recv() {
        types.push(event.type_str());
    }
    assert_eq!(
        types,
        vec![
            "SessionStarted",
            "TrackResolving",
            "TrackResolved",
            "TrackStarted",
            "SessionComplete",
        ]
    );
}
