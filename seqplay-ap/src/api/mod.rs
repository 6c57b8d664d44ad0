//! HTTP control surface for the playback service
//!
//! REST endpoints forward user intents (initialize, play, pause) to the
//! controller and expose read-only session state; SSE streams session
//! events. No business logic lives here.

pub mod handlers;
pub mod server;
pub mod sse;

pub use server::{create_router, AppContext};
