//! Test helper modules for seqplay-ap integration tests
//!
//! Provides a scriptable playback sink that records every call and can be
//! told to reject the next play request (simulating an autoplay policy
//! block), plus wiring helpers for a controller under test.

use seqplay_ap::controller::PlaybackController;
use seqplay_ap::sink::PlaybackSink;
use seqplay_ap::state::SharedState;
use seqplay_common::{Error, Playlist, Result, TrackLocator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded sink interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Load(String),
    Play,
    Pause,
}

/// Scriptable sink: records calls, optionally rejects the next play
#[derive(Default)]
pub struct ScriptedSink {
    calls: Mutex<Vec<SinkCall>>,
    reject_next_play: AtomicBool,
}

impl ScriptedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next play() call fail like a policy-blocked autoplay
    pub fn reject_next_play(&self) {
        self.reject_next_play.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn play_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, SinkCall::Play))
            .count()
    }
}

impl PlaybackSink for ScriptedSink {
    fn load(&self, locator: &TrackLocator) {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Load(locator.as_str().to_string()));
    }

    fn play(&self) -> Result<()> {
        self.calls.lock().unwrap().push(SinkCall::Play);
        if self.reject_next_play.swap(false, Ordering::SeqCst) {
            Err(Error::Sink("autoplay blocked by policy".to_string()))
        } else {
            Ok(())
        }
    }

    fn pause(&self) {
        self.calls.lock().unwrap().push(SinkCall::Pause);
    }
}

/// Simulated resolution delay used across the tests
pub const RESOLVE_DELAY: Duration = Duration::from_secs(10);

pub fn test_playlist(n: usize) -> Playlist {
    (0..n)
        .map(|i| TrackLocator::from(format!("https://example.com/{i}.mp3")))
        .collect()
}

/// Controller wired to a scripted sink and a fresh session
pub fn test_controller(n: usize) -> (Arc<PlaybackController>, Arc<ScriptedSink>) {
    let sink = Arc::new(ScriptedSink::new());
    let controller = Arc::new(PlaybackController::new(
        Arc::new(SharedState::new()),
        test_playlist(n),
        Arc::clone(&sink) as Arc<dyn PlaybackSink>,
        RESOLVE_DELAY,
    ));
    (controller, sink)
}

/// Let the pending resolution complete (requires a paused tokio clock)
pub async fn pass_resolve_delay() {
    tokio::time::sleep(RESOLVE_DELAY + Duration::from_millis(1)).await;
}
