//! CSV and JSON export of the visible coordinate log.
//!
//! The export set is the intersection of what the console would render:
//! entries whose category is currently visible, that belong to a
//! landmark category, and that carry structured coordinates. Status
//! entries never export. Both formats are built from the structured
//! entry data, never by re-parsing display text.
//!
//! The two formats intentionally differ in precision: CSV mirrors the
//! rendered log (4-decimal coordinates, 2-decimal velocity with `N/A`
//! placeholders), JSON carries raw coordinates and 3-decimal velocity
//! with explicit nulls.

use std::path::PathBuf;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use markscope_common::error::MarkscopeResult;
use markscope_stream_model::LogEntry;

use crate::Console;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(FormatParseError(s.to_string())),
        }
    }
}

/// Error returned when an export format label is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown export format (expected csv or json): {0}")]
pub struct FormatParseError(String);

/// Destination and labeling for exports.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Directory the export file is created in.
    pub output_dir: PathBuf,

    /// Device string recorded in JSON metadata.
    pub device: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            device: default_device_label(),
        }
    }
}

/// `os/arch` label for export metadata.
pub fn default_device_label() -> String {
    format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// What an export attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// A file was written at the contained path.
    Written(PathBuf),
    /// Nothing was eligible; an Error entry was appended instead.
    NothingToExport,
}

/// JSON export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub landmarks: Vec<LandmarkRecord>,
}

/// Header block of the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// When the export was produced (ISO 8601).
    pub export_date: String,

    /// Number of exported records.
    pub total_entries: usize,

    /// Producing device or host.
    pub device: String,
}

/// One exported coordinate entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkRecord {
    /// Wall-clock time of the entry (ISO 8601, millisecond precision).
    pub timestamp: String,

    /// The timestamp exactly as the console displayed it.
    pub display_timestamp: String,

    /// Category label, e.g. `Pose`.
    #[serde(rename = "type")]
    pub entry_type: String,

    pub name: String,
    pub index: u32,
    pub coordinates: ExportCoordinates,

    /// Velocity magnitude rounded to 3 decimals; null for first
    /// observations.
    pub velocity: Option<f64>,

    /// Movement glyphs; empty string when no axis moved.
    pub movement: String,
}

/// Raw coordinates in the JSON export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportCoordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

/// Timestamped export filename from local time, e.g.
/// `landmarks_2026-03-01_14-30.csv`.
pub fn export_filename(format: ExportFormat, now: DateTime<Local>) -> String {
    format!(
        "landmarks_{}.{}",
        now.format("%Y-%m-%d_%H-%M"),
        format.extension()
    )
}

/// Export the visible coordinate entries, appending the status entry
/// the console shows for the same action.
pub fn export_log(
    console: &mut Console,
    format: ExportFormat,
    settings: &ExportSettings,
) -> MarkscopeResult<ExportOutcome> {
    let has_rows = console
        .visible_entries()
        .any(|entry| is_exportable(entry));
    if !has_rows {
        console.log_error("No landmark data to export");
        return Ok(ExportOutcome::NothingToExport);
    }

    let (payload, count) = {
        let entries: Vec<&LogEntry> = console
            .visible_entries()
            .filter(|entry| is_exportable(entry))
            .collect();
        let payload = match format {
            ExportFormat::Csv => render_csv(&entries),
            ExportFormat::Json => {
                let document = build_document(&entries, &settings.device, Utc::now());
                serde_json::to_string_pretty(&document)?
            }
        };
        (payload, entries.len())
    };

    std::fs::create_dir_all(&settings.output_dir)?;
    let filename = export_filename(format, Local::now());
    let path = settings.output_dir.join(&filename);
    std::fs::write(&path, payload)?;

    console.log_system(format!("Exported to {filename}"));
    tracing::info!(entries = count, path = %path.display(), "log exported");
    Ok(ExportOutcome::Written(path))
}

fn is_exportable(entry: &LogEntry) -> bool {
    entry.category.is_landmark() && entry.coords.is_some() && entry.key.is_some()
}

/// Render the CSV payload. Column values mirror the rendered log:
/// 4-decimal coordinates, 2-decimal visibility and velocity with `N/A`
/// for missing values, glyphs in the movement column.
fn render_csv(entries: &[&LogEntry]) -> String {
    let mut csv =
        String::from("timestamp,type,landmark,index,x,y,z,visibility,velocity,movement\n");
    for entry in entries {
        let (Some(key), Some(coords)) = (&entry.key, &entry.coords) else {
            continue;
        };
        let visibility = coords
            .visibility
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        let velocity = entry
            .velocity
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        csv.push_str(&format!(
            "{},{},{},{},{:.4},{:.4},{:.4},{},{},{}\n",
            entry.display_timestamp,
            entry.category.label(),
            key.name,
            key.index,
            coords.x,
            coords.y,
            coords.z,
            visibility,
            velocity,
            entry.movement,
        ));
    }
    csv
}

/// Build the JSON document from structured entry data.
fn build_document(
    entries: &[&LogEntry],
    device: &str,
    exported_at: DateTime<Utc>,
) -> ExportDocument {
    let landmarks = entries
        .iter()
        .filter_map(|entry| {
            let key = entry.key.as_ref()?;
            let coords = entry.coords.as_ref()?;
            Some(LandmarkRecord {
                timestamp: entry.wall.to_rfc3339_opts(SecondsFormat::Millis, true),
                display_timestamp: entry.display_timestamp.clone(),
                entry_type: entry.category.label().to_string(),
                name: key.name.clone(),
                index: key.index,
                coordinates: ExportCoordinates {
                    x: coords.x,
                    y: coords.y,
                    z: coords.z,
                    visibility: coords.visibility,
                },
                velocity: entry.velocity.map(|v| (v * 1000.0).round() / 1000.0),
                movement: entry.movement.clone(),
            })
        })
        .collect::<Vec<_>>();

    ExportDocument {
        metadata: ExportMetadata {
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_entries: landmarks.len(),
            device: device.to_string(),
        },
        landmarks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use markscope_common::config::ConsoleConfig;
    use markscope_stream_model::{Category, Coordinate, LandmarkKey};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn populated_console() -> Console {
        let mut console = Console::new(ConsoleConfig::default());
        console.log_system("Camera started");

        let wrist = LandmarkKey::new(Category::Pose, "left_wrist", 15);
        console.log_sample_at(
            wrist.clone(),
            Coordinate::with_visibility(0.1, 0.5, 0.0, 0.97),
            0,
        );
        console.log_sample_at(
            wrist,
            Coordinate::with_visibility(0.3, 0.5, 0.0, 0.98),
            500_000_000,
        );
        console.log_sample_at(
            LandmarkKey::new(Category::Face, "nose tip", 0),
            Coordinate::new(0.5, 0.3, -0.02),
            600_000_000,
        );
        console
    }

    #[test]
    fn test_filename_format() {
        let at = Local.with_ymd_and_hms(2026, 3, 1, 14, 30, 59).unwrap();
        assert_eq!(
            export_filename(ExportFormat::Csv, at),
            "landmarks_2026-03-01_14-30.csv"
        );
        assert_eq!(
            export_filename(ExportFormat::Json, at),
            "landmarks_2026-03-01_14-30.json"
        );
    }

    #[test]
    fn test_csv_export_structure() {
        let mut console = populated_console();
        let dir = temp_dir("markscope_test_export_csv");
        let settings = ExportSettings {
            output_dir: dir.clone(),
            device: "test/device".to_string(),
        };

        let outcome = export_log(&mut console, ExportFormat::Csv, &settings).unwrap();
        let ExportOutcome::Written(path) = outcome else {
            panic!("expected a written file");
        };

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp,type,landmark,index,x,y,z,visibility,velocity,movement"
        );
        // 3 coordinate entries; the System entry does not export.
        assert_eq!(lines.len(), 4);

        let first: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(first.len(), 10);
        assert_eq!(first[1], "Pose");
        assert_eq!(first[2], "left_wrist");
        assert_eq!(first[3], "15");
        assert_eq!(first[4], "0.1000");
        assert_eq!(first[7], "0.97");
        assert_eq!(first[8], "N/A"); // first observation has no velocity

        let second: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(second[8], "0.40");
        assert_eq!(second[9], "→");

        let face: Vec<&str> = lines[3].split(',').collect();
        assert_eq!(face[1], "Face");
        assert_eq!(face[7], "N/A"); // faces carry no visibility

        // The success entry lands in the console.
        let last = console.last_entry().unwrap();
        assert_eq!(last.category, Category::System);
        assert!(last.message.starts_with("Exported to landmarks_"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_json_export_structure() {
        let mut console = populated_console();
        let dir = temp_dir("markscope_test_export_json");
        let settings = ExportSettings {
            output_dir: dir.clone(),
            device: "test/device".to_string(),
        };

        let outcome = export_log(&mut console, ExportFormat::Json, &settings).unwrap();
        let ExportOutcome::Written(path) = outcome else {
            panic!("expected a written file");
        };

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        let metadata = &value["metadata"];
        assert_eq!(metadata["totalEntries"], 3);
        assert_eq!(metadata["device"], "test/device");
        assert!(metadata["exportDate"].as_str().unwrap().ends_with('Z'));

        let landmarks = value["landmarks"].as_array().unwrap();
        assert_eq!(landmarks.len(), 3);

        let first = &landmarks[0];
        assert_eq!(first["type"], "Pose");
        assert_eq!(first["name"], "left_wrist");
        assert_eq!(first["index"], 15);
        assert!(first["velocity"].is_null());
        assert!((first["coordinates"]["x"].as_f64().unwrap() - 0.1).abs() < 1e-9);
        assert!((first["coordinates"]["visibility"].as_f64().unwrap() - 0.97).abs() < 1e-9);
        assert!(first["displayTimestamp"].is_string());

        let second = &landmarks[1];
        assert!((second["velocity"].as_f64().unwrap() - 0.4).abs() < 1e-9);

        // Faces have no visibility key at all.
        let face = &landmarks[2];
        assert!(face["coordinates"].get("visibility").is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_document_roundtrip() {
        let console = populated_console();
        let entries: Vec<&LogEntry> = console
            .visible_entries()
            .filter(|e| is_exportable(e))
            .collect();
        let document = build_document(
            &entries,
            "test/device",
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );

        let json = serde_json::to_string_pretty(&document).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_empty_export_appends_error_and_writes_nothing() {
        let mut console = Console::new(ConsoleConfig::default());
        console.log_system("Camera started"); // visible but not exportable

        let dir = temp_dir("markscope_test_export_empty");
        let settings = ExportSettings {
            output_dir: dir.clone(),
            device: "test/device".to_string(),
        };

        let outcome = export_log(&mut console, ExportFormat::Csv, &settings).unwrap();
        assert_eq!(outcome, ExportOutcome::NothingToExport);

        let last = console.last_entry().unwrap();
        assert_eq!(last.category, Category::Error);
        assert_eq!(last.message, "No landmark data to export");

        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_hidden_categories_do_not_export() {
        let mut console = populated_console();
        console.set_category_visible(Category::Pose, false);

        let dir = temp_dir("markscope_test_export_hidden");
        let settings = ExportSettings {
            output_dir: dir.clone(),
            device: "test/device".to_string(),
        };

        let ExportOutcome::Written(path) =
            export_log(&mut console, ExportFormat::Csv, &settings).unwrap()
        else {
            panic!("expected a written file");
        };

        let content = std::fs::read_to_string(&path).unwrap();
        let data_lines: Vec<&str> = content.lines().skip(1).collect();
        assert_eq!(data_lines.len(), 1);
        assert!(data_lines[0].contains("Face"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
