//! Drawing a trajectory plan onto an RGB canvas.
//!
//! The raster is everything the plan describes except text: axis lines,
//! tick marks, the chronological path, recency-styled sample circles,
//! and the start/end markers. Tick value labels and axis names stay in
//! the plan as strings for callers that can place text.

use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use markscope_analysis::trajectory::TrajectoryPlan;

/// Canvas background.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Axis lines and tick marks.
pub const AXIS: Rgb<u8> = Rgb([204, 204, 204]);

/// The chronological polyline.
pub const PATH: Rgb<u8> = Rgb([92, 107, 192]);

/// Marker over the oldest sample.
pub const START_MARKER: Rgb<u8> = Rgb([76, 175, 80]);

/// Marker over the newest sample.
pub const END_MARKER: Rgb<u8> = Rgb([244, 67, 54]);

/// Length of axis tick marks in pixels.
const TICK_LEN: f32 = 5.0;

/// Radius of the start/end markers in pixels.
const MARKER_RADIUS: i32 = 6;

/// Saturation and lightness for the recency hue ramp.
const POINT_SATURATION: f32 = 0.7;
const POINT_LIGHTNESS: f32 = 0.5;

/// Render a trajectory plan. Deterministic: the same plan always
/// produces the same pixels.
pub fn render_plan(plan: &TrajectoryPlan) -> RgbImage {
    let layout = plan.layout;
    let mut img = ImageBuffer::from_pixel(layout.width, layout.height, BACKGROUND);

    let pad = layout.padding as f32;
    let right = (layout.width - layout.padding) as f32;
    let bottom = (layout.height - layout.padding) as f32;

    // Axis lines: bottom and left edges of the plot area.
    draw_line_segment_mut(&mut img, (pad, bottom), (right, bottom), AXIS);
    draw_line_segment_mut(&mut img, (pad, pad), (pad, bottom), AXIS);

    // Tick marks point outward from the plot area.
    for tick in &plan.x_ticks {
        let (x, y) = tick.canvas;
        draw_line_segment_mut(&mut img, (x, y), (x, y + TICK_LEN), AXIS);
    }
    for tick in &plan.y_ticks {
        let (x, y) = tick.canvas;
        draw_line_segment_mut(&mut img, (x - TICK_LEN, y), (x, y), AXIS);
    }

    for segment in plan.polyline.windows(2) {
        draw_line_segment_mut(&mut img, segment[0], segment[1], PATH);
    }

    for point in &plan.points {
        let (x, y) = point.canvas;
        draw_filled_circle_mut(
            &mut img,
            (x.round() as i32, y.round() as i32),
            point.radius.round() as i32,
            hsl_to_rgb(point.hue_degrees, POINT_SATURATION, POINT_LIGHTNESS),
        );
    }

    // Start/end markers draw last so they stay visible over the path.
    draw_filled_circle_mut(
        &mut img,
        (plan.start.0.round() as i32, plan.start.1.round() as i32),
        MARKER_RADIUS,
        START_MARKER,
    );
    draw_filled_circle_mut(
        &mut img,
        (plan.end.0.round() as i32, plan.end.1.round() as i32),
        MARKER_RADIUS,
        END_MARKER,
    );

    img
}

/// Convert an HSL color to RGB. Hue in degrees, saturation and
/// lightness in `[0, 1]`.
pub fn hsl_to_rgb(hue_degrees: f32, saturation: f32, lightness: f32) -> Rgb<u8> {
    let h = hue_degrees.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());

    let (r, g, b) = match h {
        h if h < 1.0 => (c, x, 0.0),
        h if h < 2.0 => (x, c, 0.0),
        h if h < 3.0 => (0.0, c, x),
        h if h < 4.0 => (0.0, x, c),
        h if h < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = lightness - c / 2.0;
    Rgb([
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ])
}
