//! Playback controller
//!
//! Sequences playlist playback: owns the immutable playlist, mediates
//! between the simulated resolution delay and the playback sink, and
//! exposes the control surface the HTTP layer forwards user intents to.
//!
//! All session mutation funnels through this controller under one RwLock;
//! the resolution sleep is the only suspension point and runs in a spawned
//! task that re-acquires the lock on completion. Resolution for track `i+1`
//! is only initiated after playback of track `i` ends, so at most one
//! resolution is ever in flight.

use crate::session::Advance;
use crate::sink::{PlaybackSink, SinkNotice};
use crate::state::SharedState;
use seqplay_common::events::SessionEvent;
use seqplay_common::{Error, Playlist, Result, TrackLocator};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Sequences playlist playback through the sink
pub struct PlaybackController {
    state: Arc<SharedState>,
    playlist: Playlist,
    sink: Arc<dyn PlaybackSink>,
    resolve_delay: Duration,
}

impl PlaybackController {
    pub fn new(
        state: Arc<SharedState>,
        playlist: Playlist,
        sink: Arc<dyn PlaybackSink>,
        resolve_delay: Duration,
    ) -> Self {
        Self {
            state,
            playlist,
            sink,
            resolve_delay,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    /// Explicit user start: begin resolution for track 0
    ///
    /// Returns false (no-op) if the session was already started. The initial
    /// load uses the same resolution path as subsequent advances.
    pub async fn initialize(self: &Arc<Self>) -> bool {
        {
            let mut session = self.state.session.write().await;
            if !session.begin() {
                debug!("Initialize ignored: session already started");
                return false;
            }
        }
        info!("Session started ({} tracks)", self.playlist.len());
        self.state.broadcast_event(SessionEvent::SessionStarted {
            session_id: self.state.session_id,
            playlist_len: self.playlist.len(),
            timestamp: chrono::Utc::now(),
        });
        self.resolve_track(0).await;
        true
    }

    /// Manual play: request playback start on the sink
    ///
    /// On success re-arms auto-advance. On sink rejection the session is
    /// unchanged apart from `playing` staying false; the resolved track is
    /// kept so a later retry needs no re-resolution.
    pub async fn play(&self) -> Result<()> {
        let mut session = self.state.session.write().await;
        if session.complete() {
            return Err(Error::InvalidState("session complete".to_string()));
        }
        if session.playing() {
            return Err(Error::InvalidState("already playing".to_string()));
        }
        let Some(locator) = session.resolved_src().cloned() else {
            return Err(Error::InvalidState("no track resolved".to_string()));
        };
        let index = session.cursor();

        self.sink.load(&locator);
        match self.sink.play() {
            Ok(()) => {
                session.resume();
                drop(session);
                info!("Playback started for track {}", index);
                self.state.broadcast_event(SessionEvent::PlaybackStateChanged {
                    session_id: self.state.session_id,
                    playing: true,
                    timestamp: chrono::Utc::now(),
                });
                Ok(())
            }
            Err(e) => {
                drop(session);
                warn!("Playback start rejected for track {}: {}", index, e);
                self.state.broadcast_event(SessionEvent::PlaybackBlocked {
                    session_id: self.state.session_id,
                    index,
                    reason: e.to_string(),
                    timestamp: chrono::Utc::now(),
                });
                Err(e)
            }
        }
    }

    /// Manual pause: stops the sink and suppresses auto-advance until the
    /// user resumes
    pub async fn pause(&self) -> Result<()> {
        let mut session = self.state.session.write().await;
        if !session.playing() {
            return Err(Error::InvalidState("not playing".to_string()));
        }
        self.sink.pause();
        session.pause();
        drop(session);
        info!("Playback paused");
        self.state.broadcast_event(SessionEvent::PlaybackStateChanged {
            session_id: self.state.session_id,
            playing: false,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    /// Track-finished notification: the only place the cursor advances
    ///
    /// Ignored unless a resolved track is currently playing, so spurious or
    /// post-pause notices cannot move the cursor. Past the last playlist
    /// index the session becomes terminal; further calls are no-ops.
    pub async fn on_track_finished(self: &Arc<Self>) {
        let advance = {
            let mut session = self.state.session.write().await;
            if session.complete() {
                debug!("Track-finished ignored: session complete");
                return;
            }
            if !session.playing() {
                debug!("Track-finished ignored: not playing");
                return;
            }
            session.advance(self.playlist.len())
        };
        match advance {
            Advance::Next(next) => {
                info!("Track finished, advancing to {}", next);
                self.resolve_track(next).await;
            }
            Advance::Complete => {
                info!("All tracks played, session complete");
                self.state.broadcast_event(SessionEvent::SessionComplete {
                    session_id: self.state.session_id,
                    tracks_played: self.playlist.len(),
                    timestamp: chrono::Utc::now(),
                });
            }
        }
    }

    /// Forward sink notifications to the track-finished handler
    pub fn spawn_notice_forwarder(
        self: &Arc<Self>,
        mut notices: mpsc::UnboundedReceiver<SinkNotice>,
    ) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(notice) = notices.recv().await {
                match notice {
                    SinkNotice::Finished => controller.on_track_finished().await,
                }
            }
            debug!("Sink notice channel closed");
        })
    }

    /// Begin the simulated resolution for a track
    ///
    /// Marks `resolving` and spawns the delay task. Single-flight is
    /// guaranteed by construction (called only from `initialize` and the
    /// track-finished path) and double-checked against the session flag.
    async fn resolve_track(self: &Arc<Self>, index: usize) {
        let Some(locator) = self.playlist.get(index).cloned() else {
            warn!("Resolution requested for out-of-range index {}", index);
            return;
        };
        {
            let mut session = self.state.session.write().await;
            if session.complete() {
                return;
            }
            if session.resolving() {
                warn!("Resolution already in flight, ignoring request for {}", index);
                return;
            }
            session.resolution_started();
        }
        debug!("Resolving track {} ({})", index, locator);
        self.state.broadcast_event(SessionEvent::TrackResolving {
            session_id: self.state.session_id,
            index,
            timestamp: chrono::Utc::now(),
        });

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            // Sole suspension point: the simulated network latency.
            // No cancellation path; the resolution always completes.
            tokio::time::sleep(controller.resolve_delay).await;
            controller.finish_resolution(index, locator).await;
        });
    }

    /// Complete a resolution and run the track-ready reaction
    ///
    /// Holds the session lock across the autoplay attempt so no user intent
    /// can interleave between "resolved" and "playback started". An autoplay
    /// rejection is recoverable: the track stays resolved and the user can
    /// retry via play().
    async fn finish_resolution(self: &Arc<Self>, index: usize, locator: TrackLocator) {
        let mut session = self.state.session.write().await;
        session.resolution_complete(locator.clone());
        let resolved_event = SessionEvent::TrackResolved {
            session_id: self.state.session_id,
            index,
            locator: locator.clone(),
            timestamp: chrono::Utc::now(),
        };
        info!("Track {} resolved: {}", index, locator);

        if !session.auto_advance() {
            drop(session);
            self.state.broadcast_event(resolved_event);
            debug!("Auto-advance disabled; waiting for manual play");
            return;
        }

        self.sink.load(&locator);
        match self.sink.play() {
            Ok(()) => {
                session.playback_started();
                drop(session);
                self.state.broadcast_event(resolved_event);
                info!("Playback started for track {}", index);
                self.state.broadcast_event(SessionEvent::TrackStarted {
                    session_id: self.state.session_id,
                    index,
                    locator,
                    timestamp: chrono::Utc::now(),
                });
            }
            Err(e) => {
                session.playback_blocked();
                drop(session);
                self.state.broadcast_event(resolved_event);
                warn!("Autoplay rejected for track {}: {}", index, e);
                self.state.broadcast_event(SessionEvent::PlaybackBlocked {
                    session_id: self.state.session_id,
                    index,
                    reason: e.to_string(),
                    timestamp: chrono::Utc::now(),
                });
            }
        }
    }
}
