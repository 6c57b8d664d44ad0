//! Event types for the seqplay event system
//!
//! Provides the shared `SessionEvent` definitions and the `EventBus` used to
//! broadcast session state changes from the playback controller to any number
//! of observers (SSE clients, tests, loggers).
//!
//! # Architecture
//!
//! - **EventBus** (tokio::broadcast): one-to-many event broadcasting
//! - **Shared state** (Arc<RwLock<T>>): read-heavy session snapshots
//!
//! Events are emitted by the controller only; observers never mutate state.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::TrackLocator;

/// Session events broadcast by the playback controller
///
/// Events are serialized for SSE transmission; every variant carries the
/// session id and a UTC timestamp so observers can order and attribute them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Session left the not-started state (first resolution begins)
    SessionStarted {
        session_id: Uuid,
        /// Number of tracks in the configured playlist
        playlist_len: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Resolution started for a track (simulated fetch in progress)
    ///
    /// Triggers:
    /// - SSE: show "loading" indicator
    TrackResolving {
        session_id: Uuid,
        /// Playlist index being resolved
        index: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Resolution completed; the track is loadable
    TrackResolved {
        session_id: Uuid,
        index: usize,
        locator: TrackLocator,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback started on the sink for a resolved track
    TrackStarted {
        session_id: Uuid,
        index: usize,
        locator: TrackLocator,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Manual play/pause changed the playing flag
    ///
    /// Triggers:
    /// - SSE: update play/pause controls
    PlaybackStateChanged {
        session_id: Uuid,
        playing: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The sink rejected a playback-start request (e.g. autoplay policy)
    ///
    /// Recoverable: the track stays resolved, the user can retry play.
    PlaybackBlocked {
        session_id: Uuid,
        index: usize,
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Cursor passed the last playlist index; session is terminal
    SessionComplete {
        session_id: Uuid,
        /// Total tracks played through
        tracks_played: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl SessionEvent {
    /// Event type string used as the SSE `event:` field
    pub fn type_str(&self) -> &'static str {
        match self {
            SessionEvent::SessionStarted { .. } => "SessionStarted",
            SessionEvent::TrackResolving { .. } => "TrackResolving",
            SessionEvent::TrackResolved { .. } => "TrackResolved",
            SessionEvent::TrackStarted { .. } => "TrackStarted",
            SessionEvent::PlaybackStateChanged { .. } => "PlaybackStateChanged",
            SessionEvent::PlaybackBlocked { .. } => "PlaybackBlocked",
            SessionEvent::SessionComplete { .. } => "SessionComplete",
        }
    }
}

/// Event broadcasting bus
///
/// Wraps tokio::broadcast for one-to-many event distribution.
/// Slow receivers drop old events rather than blocking the emitter.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    ///
    /// `capacity` is the number of events buffered before old events are
    /// dropped for lagging subscribers.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: SessionEvent,
    ) -> Result<usize, broadcast::error::SendError<SessionEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// Used for all controller emissions: the session advances the same way
    /// whether or not a UI is attached.
    pub fn emit_lossy(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
