//! Shared playback state
//!
//! Thread-safe shared state for coordination between the controller and the
//! HTTP surface. Uses RwLock for concurrent read access with rare writes;
//! only the controller takes the write lock.

use crate::session::{Session, SessionSnapshot};
use seqplay_common::events::{EventBus, SessionEvent};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Shared state accessible by controller and API handlers
pub struct SharedState {
    /// Identifier stamped on every event from this session
    pub session_id: Uuid,

    /// The playback session (sole mutable entity)
    pub session: RwLock<Session>,

    /// Event broadcaster for SSE events
    pub events: EventBus,
}

impl SharedState {
    /// Create new shared state with a fresh not-started session
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            session: RwLock::new(Session::new()),
            events: EventBus::new(100),
        }
    }

    /// Broadcast an event to all SSE listeners
    ///
    /// Lossy: no receivers is OK, the session advances regardless.
    pub fn broadcast_event(&self, event: SessionEvent) {
        self.events.emit_lossy(event);
    }

    /// Subscribe to the event stream for SSE
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Read-only session snapshot for the UI surface
    pub async fn snapshot(&self, playlist_len: usize) -> SessionSnapshot {
        self.session.read().await.snapshot(playlist_len)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;

    #[tokio::test]
    async fn test_snapshot_of_fresh_session() {
        let state = SharedState::new();
        let snap = state.snapshot(4).await;
        assert_eq!(snap.phase, Phase::NotStarted);
        assert_eq!(snap.playlist_len, 4);
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers() {
        let state = SharedState::new();
        // Must not panic or error with no SSE clients attached
        state.broadcast_event(SessionEvent::SessionStarted {
            session_id: state.session_id,
            playlist_len: 4,
            timestamp: chrono::Utc::now(),
        });
    }
}
