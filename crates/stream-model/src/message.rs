//! The coordinate message grammar.
//!
//! Landmark log entries render their coordinates as a single text line:
//!
//! ```text
//! left_wrist [15]: x=0.4213, y=0.8801, z=-0.0132, vis=0.98
//! ```
//!
//! Coordinates use 4 decimal places, visibility 2, and the `vis` field
//! appears only when the detector reported one. Rendering always goes
//! struct to text; the parser exists for ingesting lines produced by
//! external detector frontends and is lenient about unknown fields.

use crate::sample::Coordinate;

/// Render a coordinate message line for a named landmark.
pub fn render_message(name: &str, index: u32, coords: &Coordinate) -> String {
    let mut message = format!(
        "{} [{}]: x={:.4}, y={:.4}, z={:.4}",
        name, index, coords.x, coords.y, coords.z
    );
    if let Some(vis) = coords.visibility {
        message.push_str(&format!(", vis={vis:.2}"));
    }
    message
}

/// Fields recovered from a coordinate message line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    pub name: String,
    pub index: u32,
    pub coords: Coordinate,
}

/// Parse a coordinate message line.
///
/// Returns `None` when the text does not follow the grammar; callers
/// treat such messages as plain log text. A `vis` value that is not a
/// number (detectors emit `N/A`) parses as no visibility.
pub fn parse_message(text: &str) -> Option<ParsedMessage> {
    let (label, fields) = text.split_once("]: ")?;
    let (name, index_part) = label.rsplit_once(" [")?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let index: u32 = index_part.trim().parse().ok()?;

    let mut x = None;
    let mut y = None;
    let mut z = None;
    let mut visibility = None;
    for field in fields.split(", ") {
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "x" => x = Some(value.parse().ok()?),
            "y" => y = Some(value.parse().ok()?),
            "z" => z = Some(value.parse().ok()?),
            "vis" => visibility = value.parse().ok(),
            _ => {}
        }
    }

    Some(ParsedMessage {
        name: name.to_string(),
        index,
        coords: Coordinate {
            x: x?,
            y: y?,
            z: z?,
            visibility,
        },
    })
}
