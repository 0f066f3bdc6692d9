//! Sample types for the Markscope landmark stream.
//!
//! Recordings are JSONL, written append-only so a crash loses at most
//! the unflushed tail. All landmark coordinates are normalized to
//! `[0.0, 1.0]` relative to the camera frame; `z` is depth relative to
//! each detector's reference plane and may be negative.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// Source channel of a sample or log entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Face,
    Hand,
    Pose,
    System,
    Error,
}

impl Category {
    /// The categories that carry landmark coordinates.
    pub const LANDMARK: [Category; 3] = [Category::Face, Category::Hand, Category::Pose];

    /// Whether entries in this category describe a tracked landmark.
    pub fn is_landmark(self) -> bool {
        matches!(self, Category::Face | Category::Hand | Category::Pose)
    }

    /// Display label used in rendered log lines, e.g. `Face`.
    pub fn label(self) -> &'static str {
        match self {
            Category::Face => "Face",
            Category::Hand => "Hand",
            Category::Pose => "Pose",
            Category::System => "System",
            Category::Error => "Error",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "face" => Ok(Category::Face),
            "hand" => Ok(Category::Hand),
            "pose" => Ok(Category::Pose),
            "system" => Ok(Category::System),
            "error" => Ok(Category::Error),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Error returned when a category label is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(String);

/// Identity of a tracked landmark within its detector topology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandmarkKey {
    /// Detector category the landmark belongs to.
    #[serde(rename = "cat")]
    pub category: Category,

    /// Human-readable landmark name, e.g. `left_wrist` or `nose tip`.
    pub name: String,

    /// Index within the detector topology.
    pub index: u32,
}

impl LandmarkKey {
    pub fn new(category: Category, name: impl Into<String>, index: u32) -> Self {
        Self {
            category,
            name: name.into(),
            index,
        }
    }
}

impl std::fmt::Display for LandmarkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.category.label().to_ascii_lowercase(),
            self.name,
            self.index
        )
    }
}

impl std::str::FromStr for LandmarkKey {
    type Err = KeyParseError;

    /// Parse a `category:name:index` selector, e.g. `pose:left_wrist:15`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, rest) = s
            .split_once(':')
            .ok_or_else(|| KeyParseError(s.to_string()))?;
        let (name, index) = rest
            .rsplit_once(':')
            .ok_or_else(|| KeyParseError(s.to_string()))?;
        let category: Category = category
            .parse()
            .map_err(|_| KeyParseError(s.to_string()))?;
        let index: u32 = index.parse().map_err(|_| KeyParseError(s.to_string()))?;
        if name.is_empty() {
            return Err(KeyParseError(s.to_string()));
        }
        Ok(Self::new(category, name, index))
    }
}

/// Error returned when a landmark selector cannot be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid landmark selector (expected category:name:index): {0}")]
pub struct KeyParseError(String);

/// A position in normalized camera space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Normalized X coordinate [0.0, 1.0].
    pub x: f64,

    /// Normalized Y coordinate [0.0, 1.0], growing downward.
    pub y: f64,

    /// Depth relative to the detector reference plane.
    pub z: f64,

    /// Detector confidence that the point is visible. Only pose
    /// landmarks report this.
    #[serde(rename = "vis", default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Coordinate {
    /// Coordinate without a visibility score (face and hand points).
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Coordinate with a visibility score (pose points).
    pub fn with_visibility(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    /// Same position with the visibility score dropped.
    pub fn without_visibility(self) -> Self {
        Self {
            visibility: None,
            ..self
        }
    }
}

/// A single recorded landmark observation with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Which landmark was observed.
    #[serde(flatten)]
    pub key: LandmarkKey,

    /// Where it was observed.
    #[serde(flatten)]
    pub coords: Coordinate,
}

impl Sample {
    pub fn new(timestamp_ns: TimestampNs, key: LandmarkKey, coords: Coordinate) -> Self {
        Self {
            timestamp_ns,
            key,
            coords,
        }
    }

    /// Timestamp as fractional seconds since session start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Stream metadata written as a `# `-prefixed comment on the first line
/// of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (ISO 8601).
    pub epoch_wall: String,

    /// Descriptive label of the producing device or host.
    pub device: String,

    /// Throttle interval that was active while recording (ms).
    pub throttle_ms: u64,
}

impl SampleStreamHeader {
    /// Current schema version.
    pub const SCHEMA_VERSION: &'static str = "1.0";

    /// Wall-clock session start, if `epoch_wall` parses as RFC 3339.
    pub fn wall_epoch(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.epoch_wall)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A parsed recording: optional header plus samples in file order.
#[derive(Debug, Clone)]
pub struct SampleStream {
    /// Filesystem path the stream was loaded from.
    pub path: PathBuf,

    /// Header metadata, when the recording carried one.
    pub header: Option<SampleStreamHeader>,

    /// Samples in file order.
    pub samples: Vec<Sample>,
}

impl SampleStream {
    /// Load a recording from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = path.as_ref().to_path_buf();

        let content = std::fs::read_to_string(&path).map_err(|e| StreamError::IoError {
            path: path.clone(),
            source: e,
        })?;

        let header = parse_header(&content).map_err(|e| StreamError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        let samples = parse_samples(&content).map_err(|e| StreamError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        Ok(Self {
            path,
            header,
            samples,
        })
    }

    /// Total recorded duration in seconds (0 when under two samples).
    pub fn duration_secs(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => {
                (last.timestamp_ns.saturating_sub(first.timestamp_ns)) as f64 / 1_000_000_000.0
            }
            _ => 0.0,
        }
    }
}

/// Errors that can occur when reading recorded streams.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Parse samples from JSONL content (one JSON object per line).
pub fn parse_samples(jsonl: &str) -> Result<Vec<Sample>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize samples to JSONL format.
pub fn serialize_samples(samples: &[Sample]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for sample in samples {
        output.push_str(&serde_json::to_string(sample)?);
        output.push('\n');
    }
    Ok(output)
}

/// Parse the header comment from the first non-empty line, if present.
pub fn parse_header(jsonl: &str) -> Result<Option<SampleStreamHeader>, serde_json::Error> {
    let first = jsonl.lines().map(str::trim).find(|line| !line.is_empty());
    match first {
        Some(line) if line.starts_with("# ") => {
            let header = serde_json::from_str(line.trim_start_matches("# "))?;
            Ok(Some(header))
        }
        _ => Ok(None),
    }
}
