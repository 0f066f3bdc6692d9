//! Clock and timing utilities for logging sessions.
//!
//! All Markscope samples are stamped against a monotonic clock epoch
//! recorded at session start. This module provides utilities for:
//! - Capturing the epoch
//! - Converting between monotonic and wall-clock time
//! - Throttling per-category log output

use chrono::{DateTime, Duration, Utc};
use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch.
    epoch_wall: DateTime<Utc>,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: Utc::now(),
        }
    }

    /// Create a clock with a known wall epoch (for replaying recordings
    /// and for deterministic tests).
    pub fn from_wall_epoch(epoch_wall: DateTime<Utc>) -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall,
        }
    }

    /// Get nanoseconds elapsed since session start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> DateTime<Utc> {
        self.epoch_wall
    }

    /// Wall-clock time corresponding to a monotonic offset.
    pub fn wall_at(&self, timestamp_ns: u64) -> DateTime<Utc> {
        self.epoch_wall + Duration::nanoseconds(timestamp_ns as i64)
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

/// Rate gate limiting how often a detector category may emit log output.
#[derive(Debug)]
pub struct ThrottleGate {
    interval_ns: u64,
    last_pass_ns: Option<u64>,
}

impl ThrottleGate {
    /// Create a gate with the given minimum interval between passes.
    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval_ns: interval_ms * 1_000_000,
            last_pass_ns: None,
        }
    }

    /// Check whether enough time has passed for the next emission.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_pass(&mut self, current_ns: u64) -> bool {
        match self.last_pass_ns {
            None => {
                self.last_pass_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.interval_ns => {
                self.last_pass_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Minimum interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.interval_ns
    }

    /// Forget the last pass so the next check fires immediately.
    pub fn reset(&mut self) {
        self.last_pass_ns = None;
    }
}
