//! Bootstrap configuration loading
//!
//! Seqplay is configured from a minimal TOML file: the ordered playlist,
//! the HTTP port, and the simulated timing constants. These settings cannot
//! change while running.
//!
//! # Settings sources priority
//!
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`SEQPLAY_CONFIG`)
//! 3. Platform config dir (`<config_dir>/seqplay/config.toml`)
//! 4. Built-in defaults (demo playlist, code constants)

use crate::playlist::{Playlist, TrackLocator};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP port for the playback service
pub const DEFAULT_PORT: u16 = 5750;

/// Default simulated resolution delay (the "network fetch")
pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 10_000;

/// Default simulated track duration used by the simulated sink
pub const DEFAULT_TRACK_DURATION_MS: u64 = 15_000;

/// Built-in demo playlist used when no config file is found
const DEMO_PLAYLIST: &[&str] = &[
    "https://static.bluebirdabc.com/lesson/ttsmv/c9/c92ba298970164cff2380caad3c4c4036755b432.mp3",
    "https://static.bluebirdabc.com/lesson/ttsmv/33/339f460fc1c51dfb175e2a6b96591c8465240803.mp3",
    "https://static.bluebirdabc.com/lesson/ttsmv/26/263d8aba4918689ece5a6d877257d97da5a8dbe1.mp3",
    "https://static.bluebirdabc.com/lesson/ttsmv/4e/4e9a90009073e7630bfbd77815063cc228521c4c.mp3",
    "https://static.bluebirdabc.com/lesson/ttsmv/9f/9f8a7f5e9035760a697ae9075e0a042449764bf9.mp3",
];

/// Bootstrap configuration loaded from TOML file
///
/// **Minimal by design** - runtime behavior beyond these knobs is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Ordered list of track locators (URIs) to play sequentially
    pub playlist: Vec<String>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Simulated resolution delay in milliseconds
    #[serde(default = "default_resolve_delay_ms")]
    pub resolve_delay_ms: u64,

    /// Simulated track duration in milliseconds (simulated sink only)
    #[serde(default = "default_track_duration_ms")]
    pub track_duration_ms: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_resolve_delay_ms() -> u64 {
    DEFAULT_RESOLVE_DELAY_MS
}

fn default_track_duration_ms() -> u64 {
    DEFAULT_TRACK_DURATION_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    /// Built-in defaults with the demo playlist
    fn default() -> Self {
        Self {
            playlist: DEMO_PLAYLIST.iter().map(|s| s.to_string()).collect(),
            port: DEFAULT_PORT,
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            track_duration_ms: DEFAULT_TRACK_DURATION_MS,
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;

        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))?;

        config.validate()?;
        info!(
            "Loaded config from {} ({} tracks)",
            path.display(),
            config.playlist.len()
        );
        Ok(config)
    }

    /// Resolve and load configuration following the priority order
    ///
    /// Falls back to built-in defaults (demo playlist) when no file exists.
    pub fn resolve(cli_arg: Option<&Path>) -> Result<Self> {
        // Priority 1: command-line argument (must exist when given)
        if let Some(path) = cli_arg {
            return Self::load_from(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var("SEQPLAY_CONFIG") {
            return Self::load_from(Path::new(&path));
        }

        // Priority 3: platform config dir
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // Priority 4: built-in defaults
        warn!("No config file found, using built-in demo playlist");
        Ok(Self::default())
    }

    /// Validate invariants the rest of the system relies on
    fn validate(&self) -> Result<()> {
        if self.playlist.is_empty() {
            return Err(Error::Config("playlist must not be empty".to_string()));
        }
        if self.resolve_delay_ms == 0 {
            warn!("resolve_delay_ms is 0; resolution will complete immediately");
        }
        Ok(())
    }

    /// Build the immutable playlist from the configured locators
    pub fn playlist(&self) -> Playlist {
        self.playlist
            .iter()
            .map(|s| TrackLocator::from(s.clone()))
            .collect()
    }

    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    pub fn track_duration(&self) -> Duration {
        Duration::from_millis(self.track_duration_ms)
    }
}

/// Default configuration file path for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seqplay").join("config.toml"))
}
