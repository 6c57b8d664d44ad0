//! # Seqplay Playback Service (seqplay-ap)
//!
//! Minimal sequential media player: plays a fixed ordered list of remote
//! audio clips one after another, simulating a network fetch delay before
//! each clip becomes available, with manual play/pause controls that
//! interact with auto-advance.
//!
//! **Architecture:** explicit session state machine driven by a playback
//! controller, observed over HTTP/SSE. The simulated sink stands in for the
//! audio output surface.

pub mod api;
pub mod controller;
pub mod session;
pub mod sink;
pub mod state;

pub use seqplay_common::{Error, Result};
pub use state::SharedState;
