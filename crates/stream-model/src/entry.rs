//! Console log entries.
//!
//! An entry keeps both the rendered message text and the structured
//! data it was rendered from, so exports and trajectory plots never
//! have to re-parse display strings.

use chrono::{DateTime, Utc};

use crate::sample::{Category, Coordinate, LandmarkKey, TimestampNs};

/// One console log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Source channel.
    pub category: Category,

    /// Monotonic nanoseconds since session start.
    pub timestamp_ns: TimestampNs,

    /// Wall-clock time the entry was created.
    pub wall: DateTime<Utc>,

    /// Pre-rendered display timestamp, e.g. `14:03:22.118`.
    pub display_timestamp: String,

    /// Message text. For coordinate entries this is the rendered
    /// grammar line; for status entries it is free text.
    pub message: String,

    /// Landmark identity, present on coordinate entries.
    pub key: Option<LandmarkKey>,

    /// Structured coordinates, present on coordinate entries.
    pub coords: Option<Coordinate>,

    /// Velocity magnitude in normalized units per second, when the
    /// entry had a timed predecessor.
    pub velocity: Option<f64>,

    /// Movement direction glyphs; empty when no axis moved.
    pub movement: String,
}

impl LogEntry {
    /// A status entry (System, Error, or unparsed landmark text).
    pub fn status(
        category: Category,
        timestamp_ns: TimestampNs,
        wall: DateTime<Utc>,
        display_timestamp: String,
        message: String,
    ) -> Self {
        Self {
            category,
            timestamp_ns,
            wall,
            display_timestamp,
            message,
            key: None,
            coords: None,
            velocity: None,
            movement: String::new(),
        }
    }

    /// Whether this entry carries structured coordinates.
    pub fn is_coordinate(&self) -> bool {
        self.coords.is_some()
    }

    /// Render the entry the way the console prints it:
    ///
    /// ```text
    /// [14:03:22.118] Pose: left_wrist [15]: x=0.4213, y=0.8801, z=-0.0132, vis=0.98 (v=0.34) →↑
    /// ```
    ///
    /// The velocity suffix appears only for a positive magnitude; the
    /// glyph suffix only when some axis moved.
    pub fn display_line(&self) -> String {
        let mut line = format!(
            "[{}] {}: {}",
            self.display_timestamp,
            self.category.label(),
            self.message
        );
        if let Some(velocity) = self.velocity {
            if velocity > 0.0 {
                line.push_str(&format!(" (v={velocity:.2})"));
            }
        }
        if !self.movement.is_empty() {
            line.push(' ');
            line.push_str(&self.movement);
        }
        line
    }
}
