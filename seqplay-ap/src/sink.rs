//! Playback sink abstraction
//!
//! The sink is the external audio-output surface the controller drives. The
//! controller is the only caller of `load`/`play`/`pause`; track-finished
//! notifications flow back out-of-band over an mpsc channel so the sink
//! never re-enters the controller directly.

use seqplay_common::{Error, Result, TrackLocator};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Notification emitted by a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkNotice {
    /// The loaded track completed naturally
    Finished,
}

/// Audio output surface driven by the playback controller
///
/// `play` may be rejected (e.g. an autoplay policy); the controller treats
/// that as recoverable and does not retry automatically.
pub trait PlaybackSink: Send + Sync {
    /// Load a resolved track locator into the sink
    fn load(&self, locator: &TrackLocator);

    /// Request playback start for the loaded track
    fn play(&self) -> Result<()>;

    /// Stop playback; no Finished notice is emitted for a paused track
    fn pause(&self);
}

/// Simulated sink: logs operations and emits `Finished` after a fixed
/// simulated track duration
///
/// No audio is produced; this stands in for the real output surface so the
/// service can run the full sequencing loop end to end. Pause aborts the
/// countdown; a later play restarts it from the full duration (position
/// tracking is out of scope).
pub struct SimulatedSink {
    track_duration: Duration,
    notices: mpsc::UnboundedSender<SinkNotice>,
    loaded: Mutex<Option<TrackLocator>>,
    countdown: Mutex<Option<JoinHandle<()>>>,
}

impl SimulatedSink {
    /// Create a simulated sink and the receiver for its notifications
    ///
    /// Must be used within a tokio runtime: `play` spawns the countdown task.
    pub fn new(track_duration: Duration) -> (Self, mpsc::UnboundedReceiver<SinkNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                track_duration,
                notices: tx,
                loaded: Mutex::new(None),
                countdown: Mutex::new(None),
            },
            rx,
        )
    }

    fn abort_countdown(&self) {
        if let Some(handle) = self.countdown.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for SimulatedSink {
    fn drop(&mut self) {
        self.abort_countdown();
    }
}

impl PlaybackSink for SimulatedSink {
    fn load(&self, locator: &TrackLocator) {
        debug!("Sink loading {}", locator);
        self.abort_countdown();
        *self.loaded.lock().unwrap() = Some(locator.clone());
    }

    fn play(&self) -> Result<()> {
        let loaded = self.loaded.lock().unwrap();
        let locator = loaded
            .as_ref()
            .ok_or_else(|| Error::Sink("no track loaded".to_string()))?;
        info!("Sink playing {}", locator);

        let mut countdown = self.countdown.lock().unwrap();
        if let Some(handle) = countdown.take() {
            handle.abort();
        }
        let notices = self.notices.clone();
        let duration = self.track_duration;
        *countdown = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = notices.send(SinkNotice::Finished);
        }));

        Ok(())
    }

    fn pause(&self) {
        debug!("Sink paused");
        self.abort_countdown();
    }
}
