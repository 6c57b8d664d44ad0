//! # Seqplay Common Library
//!
//! Shared code for the seqplay workspace:
//! - Error taxonomy
//! - Event types (SessionEvent enum) and EventBus
//! - Playlist / track locator types
//! - Bootstrap configuration loading (playlist, port, simulated delays)

pub mod config;
pub mod error;
pub mod events;
pub mod playlist;

pub use error::{Error, Result};
pub use playlist::{Playlist, TrackLocator};
