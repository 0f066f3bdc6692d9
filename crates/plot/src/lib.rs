//! Markscope Plot
//!
//! Renders a landmark's recent movement as a PNG image. The console's
//! history buffer feeds the trajectory planner; this crate rasterizes
//! the resulting plan and writes it to disk. A landmark needs at least
//! two buffered samples to plot — with fewer, the console gets an
//! Error entry and nothing is drawn.

pub mod raster;

use std::path::{Path, PathBuf};

use image::RgbImage;

use markscope_analysis::trajectory::{plan_trajectory, Plane, PlotLayout};
use markscope_common::error::{MarkscopeError, MarkscopeResult};
use markscope_console::Console;
use markscope_stream_model::LandmarkKey;

pub use raster::render_plan;

/// What a visualization attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualizeOutcome {
    /// A PNG was written at the contained path.
    Written(PathBuf),
    /// Under two buffered samples; an Error entry was appended instead.
    NotEnoughData,
}

/// Plot a landmark's buffered trajectory to a PNG file.
pub fn visualize_landmark(
    console: &mut Console,
    key: &LandmarkKey,
    plane: Plane,
    output: &Path,
) -> MarkscopeResult<VisualizeOutcome> {
    let history = console.history_for(key);
    let Some(plan) = plan_trajectory(&history, plane, PlotLayout::default()) else {
        console.log_error("Not enough data to visualize this landmark");
        return Ok(VisualizeOutcome::NotEnoughData);
    };

    let img = render_plan(&plan);
    save_png(&img, output)?;

    tracing::info!(
        landmark = %key,
        samples = history.len(),
        path = %output.display(),
        "trajectory rendered"
    );
    Ok(VisualizeOutcome::Written(output.to_path_buf()))
}

/// Write an image as PNG, creating parent directories as needed.
pub fn save_png(img: &RgbImage, path: &Path) -> MarkscopeResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path).map_err(|e| {
        MarkscopeError::visualize(format!("failed to write {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use markscope_common::config::ConsoleConfig;
    use markscope_stream_model::{Category, Coordinate};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn wrist() -> LandmarkKey {
        LandmarkKey::new(Category::Pose, "left_wrist", 15)
    }

    #[test]
    fn test_visualize_writes_png() {
        let mut console = Console::new(ConsoleConfig::default());
        console.log_sample_at(wrist(), Coordinate::new(0.2, 0.3, 0.0), 0);
        console.log_sample_at(wrist(), Coordinate::new(0.5, 0.5, 0.0), 100_000_000);
        console.log_sample_at(wrist(), Coordinate::new(0.8, 0.7, 0.0), 200_000_000);
        let entries_before = console.entry_count();

        let dir = temp_dir("markscope_test_plot_write");
        let output = dir.join("wrist.png");
        let outcome = visualize_landmark(&mut console, &wrist(), Plane::Xy, &output).unwrap();

        assert_eq!(outcome, VisualizeOutcome::Written(output.clone()));
        let written = image::open(&output).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (500, 400));
        // Success adds no console entry.
        assert_eq!(console.entry_count(), entries_before);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_visualize_requires_two_samples() {
        let mut console = Console::new(ConsoleConfig::default());
        console.log_sample_at(wrist(), Coordinate::new(0.2, 0.3, 0.0), 0);

        let dir = temp_dir("markscope_test_plot_sparse");
        let output = dir.join("wrist.png");
        let outcome = visualize_landmark(&mut console, &wrist(), Plane::Xy, &output).unwrap();

        assert_eq!(outcome, VisualizeOutcome::NotEnoughData);
        assert!(!output.exists());

        let entry = console.last_entry().unwrap();
        assert_eq!(entry.category, Category::Error);
        assert_eq!(entry.message, "Not enough data to visualize this landmark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_visualize_only_uses_the_requested_landmark() {
        let mut console = Console::new(ConsoleConfig::default());
        // Plenty of nose samples, only one wrist sample.
        let nose = LandmarkKey::new(Category::Face, "nose tip", 0);
        for i in 0..5u64 {
            console.log_sample_at(
                nose.clone(),
                Coordinate::new(0.1 * i as f64, 0.5, 0.0),
                i * 100_000_000,
            );
        }
        console.log_sample_at(wrist(), Coordinate::new(0.5, 0.5, 0.0), 600_000_000);

        let dir = temp_dir("markscope_test_plot_key_scoped");
        let output = dir.join("wrist.png");
        let outcome = visualize_landmark(&mut console, &wrist(), Plane::Xy, &output).unwrap();
        assert_eq!(outcome, VisualizeOutcome::NotEnoughData);

        std::fs::remove_dir_all(&dir).ok();
    }
}
