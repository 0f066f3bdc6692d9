//! Trajectory planning: a landmark's recent movement as a 2D plot.
//!
//! Produces a resolution-independent render plan — axis ticks with
//! their value labels, the chronological polyline, per-point radius and
//! recency hue, and start/end markers. Rasterization is a separate
//! concern so UI clients can draw the same plan with native text.
//!
//! # Algorithm
//!
//! 1. **Project** each 3D sample onto the requested plane.
//! 2. **Bounds:** min/max per axis, zero ranges widened to 1.0, then
//!    10% padding on each side.
//! 3. **Map** values to canvas pixels, inverting the vertical axis so
//!    larger values draw higher.
//! 4. **Style:** point radius grows with recency, hue runs green (old)
//!    to red (new).

use serde::{Deserialize, Serialize};

use markscope_stream_model::{Coordinate, Sample};

/// Fraction of the value range added as padding on each side.
const RANGE_PADDING: f64 = 0.1;

/// Number of tick intervals along each axis (ticks = intervals + 1).
const TICK_INTERVALS: u32 = 5;

/// Samples required before a trajectory can be plotted.
pub const MIN_TRAJECTORY_SAMPLES: usize = 2;

/// Projection plane for the 3D sample history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    /// Camera-facing view: x across, y down the frame.
    #[default]
    Xy,
    /// Top-down view: x across, z toward the camera.
    Xz,
    /// Side view: y across, z toward the camera.
    Yz,
}

impl Plane {
    /// Axis labels for the plot, horizontal then vertical.
    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Plane::Xy => ("X", "Y"),
            Plane::Xz => ("X", "Z"),
            Plane::Yz => ("Y", "Z"),
        }
    }

    fn project(self, coords: &Coordinate) -> (f64, f64) {
        match self {
            Plane::Xy => (coords.x, coords.y),
            Plane::Xz => (coords.x, coords.z),
            Plane::Yz => (coords.y, coords.z),
        }
    }
}

impl std::str::FromStr for Plane {
    type Err = PlaneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Plane::Xy),
            "xz" => Ok(Plane::Xz),
            "yz" => Ok(Plane::Yz),
            _ => Err(PlaneParseError(s.to_string())),
        }
    }
}

/// Error returned when a plane label is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown projection plane (expected xy, xz, or yz): {0}")]
pub struct PlaneParseError(String);

/// Canvas geometry for trajectory plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotLayout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Margin on all four sides, in pixels.
    pub padding: u32,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 500,
            height: 400,
            padding: 40,
        }
    }
}

/// Value-space bounds after zero-range fallback and padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotBounds {
    /// Bounds enclosing `points` with padding on each side. An axis
    /// whose values are all identical gets a 1.0 range before padding
    /// so it still produces a drawable span.
    pub fn enclosing(points: &[(f64, f64)]) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for (x, y) in points {
            min_x = min_x.min(*x);
            max_x = max_x.max(*x);
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }

        let mut range_x = max_x - min_x;
        if range_x == 0.0 {
            range_x = 1.0;
        }
        let mut range_y = max_y - min_y;
        if range_y == 0.0 {
            range_y = 1.0;
        }

        Self {
            min_x: min_x - range_x * RANGE_PADDING,
            max_x: max_x + range_x * RANGE_PADDING,
            min_y: min_y - range_y * RANGE_PADDING,
            max_y: max_y + range_y * RANGE_PADDING,
        }
    }
}

/// A styled point along the trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    /// Canvas position in pixels.
    pub canvas: (f32, f32),

    /// Radius in pixels; grows with recency.
    pub radius: f32,

    /// Recency hue in degrees: 120 (oldest, green) down to 0 (newest, red).
    pub hue_degrees: f32,
}

/// An axis tick: canvas position of the mark plus its value label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Canvas position on the axis line.
    pub canvas: (f32, f32),

    /// Value label, 2 decimal places.
    pub label: String,
}

/// Everything needed to draw a trajectory plot.
#[derive(Debug, Clone)]
pub struct TrajectoryPlan {
    pub layout: PlotLayout,
    pub plane: Plane,
    pub bounds: PlotBounds,

    /// Axis labels, horizontal then vertical.
    pub axis_labels: (&'static str, &'static str),

    /// Ticks along the bottom axis, left to right.
    pub x_ticks: Vec<AxisTick>,

    /// Ticks along the left axis, bottom to top.
    pub y_ticks: Vec<AxisTick>,

    /// Canvas positions of the samples in chronological order.
    pub polyline: Vec<(f32, f32)>,

    /// Styled sample points, oldest first.
    pub points: Vec<PlotPoint>,

    /// Canvas position of the oldest sample.
    pub start: (f32, f32),

    /// Canvas position of the newest sample.
    pub end: (f32, f32),
}

/// Build a render plan from a landmark's chronological sample history.
///
/// Returns `None` with fewer than [`MIN_TRAJECTORY_SAMPLES`] samples.
pub fn plan_trajectory(
    history: &[Sample],
    plane: Plane,
    layout: PlotLayout,
) -> Option<TrajectoryPlan> {
    if history.len() < MIN_TRAJECTORY_SAMPLES {
        return None;
    }

    let projected: Vec<(f64, f64)> = history
        .iter()
        .map(|sample| plane.project(&sample.coords))
        .collect();
    let bounds = PlotBounds::enclosing(&projected);

    let padding = layout.padding as f64;
    let inner_w = (layout.width.saturating_sub(2 * layout.padding)) as f64;
    let inner_h = (layout.height.saturating_sub(2 * layout.padding)) as f64;

    // Vertical axis is inverted: larger values draw higher on canvas.
    let map = |x: f64, y: f64| -> (f32, f32) {
        let cx = padding + (x - bounds.min_x) / (bounds.max_x - bounds.min_x) * inner_w;
        let cy = padding + (bounds.max_y - y) / (bounds.max_y - bounds.min_y) * inner_h;
        (cx as f32, cy as f32)
    };

    let axis_y = (layout.height - layout.padding) as f32;
    let axis_x = layout.padding as f32;
    let mut x_ticks = Vec::with_capacity(TICK_INTERVALS as usize + 1);
    let mut y_ticks = Vec::with_capacity(TICK_INTERVALS as usize + 1);
    for i in 0..=TICK_INTERVALS {
        let fraction = i as f64 / TICK_INTERVALS as f64;

        let x_value = bounds.min_x + (bounds.max_x - bounds.min_x) * fraction;
        x_ticks.push(AxisTick {
            canvas: ((padding + inner_w * fraction) as f32, axis_y),
            label: format!("{x_value:.2}"),
        });

        let y_value = bounds.min_y + (bounds.max_y - bounds.min_y) * fraction;
        y_ticks.push(AxisTick {
            canvas: (axis_x, (padding + inner_h - inner_h * fraction) as f32),
            label: format!("{y_value:.2}"),
        });
    }

    let polyline: Vec<(f32, f32)> = projected.iter().map(|&(x, y)| map(x, y)).collect();

    let len = projected.len();
    let points: Vec<PlotPoint> = polyline
        .iter()
        .enumerate()
        .map(|(i, &canvas)| PlotPoint {
            canvas,
            radius: 3.0 + (i as f32 / len as f32) * 5.0,
            hue_degrees: 120.0 - (i as f32 / (len - 1) as f32) * 120.0,
        })
        .collect();

    let start = polyline[0];
    let end = polyline[len - 1];

    Some(TrajectoryPlan {
        layout,
        plane,
        bounds,
        axis_labels: plane.axis_labels(),
        x_ticks,
        y_ticks,
        polyline,
        points,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use markscope_stream_model::{Category, LandmarkKey};

    fn samples(coords: &[(f64, f64, f64)]) -> Vec<Sample> {
        let key = LandmarkKey::new(Category::Pose, "left_wrist", 15);
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y, z))| {
                Sample::new(
                    i as u64 * 100_000_000,
                    key.clone(),
                    Coordinate::new(x, y, z),
                )
            })
            .collect()
    }

    #[test]
    fn test_requires_two_samples() {
        let history = samples(&[(0.5, 0.5, 0.0)]);
        assert!(plan_trajectory(&history, Plane::Xy, PlotLayout::default()).is_none());
        assert!(plan_trajectory(&[], Plane::Xy, PlotLayout::default()).is_none());
    }

    #[test]
    fn test_bounds_padding() {
        let bounds = PlotBounds::enclosing(&[(0.2, 0.3), (0.8, 0.7)]);
        // x range 0.6, padded by 0.06 per side
        assert!((bounds.min_x - 0.14).abs() < 1e-9);
        assert!((bounds.max_x - 0.86).abs() < 1e-9);
        // y range 0.4, padded by 0.04 per side
        assert!((bounds.min_y - 0.26).abs() < 1e-9);
        assert!((bounds.max_y - 0.74).abs() < 1e-9);
    }

    #[test]
    fn test_zero_range_falls_back_before_padding() {
        let bounds = PlotBounds::enclosing(&[(0.5, 0.5), (0.5, 0.9)]);
        // x values identical: range becomes 1.0, padded to [0.4, 0.6]
        assert!((bounds.min_x - 0.4).abs() < 1e-9);
        assert!((bounds.max_x - 0.6).abs() < 1e-9);
        // y has a real range and pads normally
        assert!((bounds.min_y - 0.46).abs() < 1e-9);
        assert!((bounds.max_y - 0.94).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_axis_is_inverted() {
        let history = samples(&[(0.5, 0.2, 0.0), (0.5, 0.8, 0.0)]);
        let plan = plan_trajectory(&history, Plane::Xy, PlotLayout::default()).unwrap();
        // The second sample has the larger y value, so it draws higher
        // (smaller canvas y).
        assert!(plan.polyline[1].1 < plan.polyline[0].1);
    }

    #[test]
    fn test_six_ticks_spanning_axes() {
        let layout = PlotLayout::default();
        let history = samples(&[(0.2, 0.3, 0.0), (0.8, 0.7, 0.0)]);
        let plan = plan_trajectory(&history, Plane::Xy, layout).unwrap();

        assert_eq!(plan.x_ticks.len(), 6);
        assert_eq!(plan.y_ticks.len(), 6);

        let first = &plan.x_ticks[0];
        let last = &plan.x_ticks[5];
        assert!((first.canvas.0 - layout.padding as f32).abs() < 1e-3);
        assert!((last.canvas.0 - (layout.width - layout.padding) as f32).abs() < 1e-3);
        assert_eq!(first.label, "0.14");
        assert_eq!(last.label, "0.86");

        for tick in &plan.x_ticks {
            assert!((tick.canvas.1 - (layout.height - layout.padding) as f32).abs() < 1e-3);
        }
        for tick in &plan.y_ticks {
            assert!((tick.canvas.0 - layout.padding as f32).abs() < 1e-3);
        }
    }

    #[test]
    fn test_point_styling_progression() {
        let history = samples(&[(0.2, 0.2, 0.0), (0.4, 0.4, 0.0), (0.6, 0.6, 0.0)]);
        let plan = plan_trajectory(&history, Plane::Xy, PlotLayout::default()).unwrap();

        assert_eq!(plan.points.len(), 3);
        // Oldest point: smallest radius, green hue.
        assert!((plan.points[0].radius - 3.0).abs() < 1e-6);
        assert!((plan.points[0].hue_degrees - 120.0).abs() < 1e-6);
        // Newest point: largest radius, red hue.
        assert!(plan.points[2].radius > plan.points[1].radius);
        assert!((plan.points[2].hue_degrees - 0.0).abs() < 1e-6);

        assert_eq!(plan.start, plan.polyline[0]);
        assert_eq!(plan.end, plan.polyline[2]);
    }

    #[test]
    fn test_plane_projection() {
        let history = samples(&[(0.1, 0.2, 0.3), (0.4, 0.5, 0.6)]);

        let xz = plan_trajectory(&history, Plane::Xz, PlotLayout::default()).unwrap();
        assert_eq!(xz.axis_labels, ("X", "Z"));
        // Bounds come from x and z values.
        assert!((xz.bounds.min_x - (0.1 - 0.03)).abs() < 1e-9);
        assert!((xz.bounds.max_y - (0.6 + 0.03)).abs() < 1e-9);

        let yz = plan_trajectory(&history, Plane::Yz, PlotLayout::default()).unwrap();
        assert_eq!(yz.axis_labels, ("Y", "Z"));
    }

    #[test]
    fn test_plane_parse() {
        assert_eq!("xy".parse::<Plane>().unwrap(), Plane::Xy);
        assert_eq!("XZ".parse::<Plane>().unwrap(), Plane::Xz);
        assert_eq!("yz".parse::<Plane>().unwrap(), Plane::Yz);
        assert!("xw".parse::<Plane>().is_err());
    }
}
