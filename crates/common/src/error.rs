//! Error types shared across Markscope crates.

use std::path::PathBuf;

/// Top-level error type for Markscope operations.
#[derive(Debug, thiserror::Error)]
pub enum MarkscopeError {
    #[error("Ingest error: {message}")]
    Ingest { message: String },

    #[error("Stream error: {message}")]
    Stream { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Visualization error: {message}")]
    Visualize { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MarkscopeError.
pub type MarkscopeResult<T> = Result<T, MarkscopeError>;

impl MarkscopeError {
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest {
            message: msg.into(),
        }
    }

    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn visualize(msg: impl Into<String>) -> Self {
        Self::Visualize {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
