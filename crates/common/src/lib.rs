//! Markscope Common Utilities
//!
//! Shared infrastructure for all Markscope crates:
//! - Error types and result aliases
//! - Session clock for monotonic timestamps and display formatting
//! - Tracing setup with stderr or file writers
//! - Configuration loading and persistence

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
