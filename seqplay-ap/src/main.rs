//! Playback service (seqplay-ap) - Main entry point
//!
//! Sequential auto-playing media demo: resolves each configured track after
//! a simulated network delay, auto-advances on track completion, and serves
//! the HTTP/SSE control surface for UIs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seqplay_ap::api;
use seqplay_ap::controller::PlaybackController;
use seqplay_ap::sink::SimulatedSink;
use seqplay_ap::state::SharedState;
use seqplay_common::config::TomlConfig;

/// Command-line arguments for seqplay-ap
#[derive(Parser, Debug)]
#[command(name = "seqplay-ap")]
#[command(about = "Sequential playback service")]
#[command(version)]
struct Args {
    /// Path to TOML config file (playlist, port, simulated delays)
    #[arg(short, long, env = "SEQPLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "SEQPLAY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seqplay_ap=debug,seqplay_common=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration (CLI > env > config dir > built-in demo playlist)
    let config = TomlConfig::resolve(args.config.as_deref())
        .context("Failed to load configuration")?;
    let port = args.port.unwrap_or(config.port);
    let playlist = config.playlist();

    info!("Starting seqplay playback service on port {}", port);
    info!(
        "Playlist: {} tracks, resolve delay {:?}, track duration {:?}",
        playlist.len(),
        config.resolve_delay(),
        config.track_duration()
    );

    // Wire up state, sink and controller
    let state = Arc::new(SharedState::new());
    let (sink, notices) = SimulatedSink::new(config.track_duration());
    let controller = Arc::new(PlaybackController::new(
        Arc::clone(&state),
        playlist,
        Arc::new(sink),
        config.resolve_delay(),
    ));

    // Forward sink track-finished notifications to the controller
    controller.spawn_notice_forwarder(notices);
    info!("Playback controller initialized");

    // Run the HTTP control surface
    let ctx = api::AppContext {
        state,
        controller,
        port,
    };
    api::server::run(ctx, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
