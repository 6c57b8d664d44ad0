//! Playback session state machine
//!
//! The session is the only mutable entity in the system. All transitions are
//! pure methods on `Session` (no I/O, no timers); the playback controller is
//! the sole caller and the HTTP layer only observes snapshots.
//!
//! State machine:
//! `NotStarted → Resolving(0) → Ready(i)/Playing(i) ⇄ Paused(i) →
//!  Resolving(i+1) → … → Complete`. `Complete` is terminal.

use seqplay_common::TrackLocator;
use serde::Serialize;

/// Derived session phase, for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Created, waiting for explicit user start
    NotStarted,
    /// A resolution is in flight for the cursor track
    Resolving,
    /// Cursor track resolved, playback not running, auto-advance armed
    Ready,
    /// Sink is playing the cursor track
    Playing,
    /// Manually paused; auto-advance suppressed
    Paused,
    /// Cursor passed the last playlist index; terminal
    Complete,
}

/// Outcome of a track-finished transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved to this index; resolution must begin for it
    Next(usize),
    /// Playlist exhausted; session is now terminal
    Complete,
}

/// Read-only session view for the UI surface
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub started: bool,
    pub resolving: bool,
    pub playing: bool,
    pub auto_advance: bool,
    pub complete: bool,
    pub cursor: usize,
    pub resolved_src: Option<TrackLocator>,
    pub phase: Phase,
    pub playlist_len: usize,
}

/// The playback session
///
/// Invariants (checked by `debug_assert_invariants`):
/// - `resolved_src` is Some only after resolution for `cursor` completed
/// - `playing` implies `resolved_src` is Some
/// - `resolving` and `resolved_src` are never set together
/// - no transition leaves `complete`
#[derive(Debug, Clone)]
pub struct Session {
    started: bool,
    cursor: usize,
    resolved_src: Option<TrackLocator>,
    playing: bool,
    resolving: bool,
    auto_advance: bool,
    complete: bool,
}

impl Session {
    /// Create a session in the not-started state
    ///
    /// Auto-advance starts enabled: the first resolved track is auto-played
    /// unless the user pauses first.
    pub fn new() -> Self {
        Self {
            started: false,
            cursor: 0,
            resolved_src: None,
            playing: false,
            resolving: false,
            auto_advance: true,
            complete: false,
        }
    }

    // === Accessors ===

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn resolved_src(&self) -> Option<&TrackLocator> {
        self.resolved_src.as_ref()
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn resolving(&self) -> bool {
        self.resolving
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Derive the current phase from the session flags
    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.complete {
            Phase::Complete
        } else if self.resolving {
            Phase::Resolving
        } else if self.playing {
            Phase::Playing
        } else if self.auto_advance {
            Phase::Ready
        } else {
            Phase::Paused
        }
    }

    /// Snapshot for the UI surface
    pub fn snapshot(&self, playlist_len: usize) -> SessionSnapshot {
        SessionSnapshot {
            started: self.started,
            resolving: self.resolving,
            playing: self.playing,
            auto_advance: self.auto_advance,
            complete: self.complete,
            cursor: self.cursor,
            resolved_src: self.resolved_src.clone(),
            phase: self.phase(),
            playlist_len,
        }
    }

    // === Transitions ===

    /// Explicit user start. Returns false if already started (no-op).
    pub fn begin(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.debug_assert_invariants();
        true
    }

    /// Mark a resolution in flight for the cursor track
    ///
    /// Callers must not begin a second resolution while one is pending.
    pub fn resolution_started(&mut self) {
        debug_assert!(!self.resolving, "resolution already in flight");
        debug_assert!(!self.complete, "resolution after Complete");
        self.resolving = true;
        self.resolved_src = None;
        self.debug_assert_invariants();
    }

    /// Resolution for the cursor track completed with this locator
    pub fn resolution_complete(&mut self, locator: TrackLocator) {
        debug_assert!(self.resolving, "resolution_complete without resolution");
        self.resolving = false;
        self.resolved_src = Some(locator);
        self.debug_assert_invariants();
    }

    /// Sink accepted a playback-start request
    pub fn playback_started(&mut self) {
        debug_assert!(self.resolved_src.is_some(), "playing without resolved track");
        self.playing = true;
        self.debug_assert_invariants();
    }

    /// Sink rejected a playback-start request; cursor and resolution untouched
    pub fn playback_blocked(&mut self) {
        self.playing = false;
        self.debug_assert_invariants();
    }

    /// Manual resume: re-arms auto-advance
    pub fn resume(&mut self) {
        debug_assert!(self.resolved_src.is_some(), "resume without resolved track");
        self.playing = true;
        self.auto_advance = true;
        self.debug_assert_invariants();
    }

    /// Manual pause: suppresses auto-advance until resumed
    pub fn pause(&mut self) {
        self.playing = false;
        self.auto_advance = false;
        self.debug_assert_invariants();
    }

    /// Track finished: advance the cursor or reach the terminal state
    ///
    /// The only place the cursor moves. Advances by exactly 1 per call.
    pub fn advance(&mut self, playlist_len: usize) -> Advance {
        debug_assert!(!self.complete, "advance after Complete");
        let next = self.cursor + 1;
        if next < playlist_len {
            self.cursor = next;
            self.resolved_src = None;
            self.playing = false;
            self.debug_assert_invariants();
            Advance::Next(next)
        } else {
            self.playing = false;
            self.complete = true;
            self.debug_assert_invariants();
            Advance::Complete
        }
    }

    fn debug_assert_invariants(&self) {
        debug_assert!(!(self.playing && self.resolved_src.is_none()));
        debug_assert!(!(self.resolving && self.resolved_src.is_some()));
        debug_assert!(!(self.complete && (self.playing || self.resolving)));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
