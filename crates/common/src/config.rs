//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest accepted per-axis change threshold.
pub const POSITION_THRESHOLD_MIN: f64 = 0.001;

/// Largest accepted per-axis change threshold.
pub const POSITION_THRESHOLD_MAX: f64 = 0.05;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where exports and recordings are written.
    pub output_dir: PathBuf,

    /// Console behavior settings.
    pub console: ConsoleConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tunables for the landmark console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Maximum number of entries kept in the log store.
    pub max_log_entries: usize,

    /// Append milliseconds to display timestamps.
    pub show_milliseconds: bool,

    /// Suppress samples whose position barely changed.
    pub show_changes_only: bool,

    /// Smallest per-axis coordinate delta considered significant.
    pub position_threshold: f64,

    /// Minimum interval between logged detection batches per category (ms).
    pub throttle_ms: u64,

    /// Capacity of the per-session trajectory history buffer.
    pub history_buffer_size: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "markscope=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs_default_output(),
            console: ConsoleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_log_entries: 1000,
            show_milliseconds: true,
            show_changes_only: false,
            position_threshold: 0.015,
            throttle_ms: 1000,
            history_buffer_size: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl ConsoleConfig {
    /// Clamp tunables into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.position_threshold = self
            .position_threshold
            .clamp(POSITION_THRESHOLD_MIN, POSITION_THRESHOLD_MAX);
        self.max_log_entries = self.max_log_entries.max(1);
        self.history_buffer_size = self.history_buffer_size.max(1);
        self
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("markscope").join("config.json")
}

/// Default output directory for exports and recordings.
fn dirs_default_output() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("markscope").join("sessions")
}
