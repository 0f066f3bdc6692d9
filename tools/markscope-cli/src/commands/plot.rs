//! Render a landmark's trajectory to a PNG.

use std::path::PathBuf;

use markscope_analysis::trajectory::Plane;
use markscope_common::config::AppConfig;
use markscope_console::replay::replay_stream;
use markscope_plot::{visualize_landmark, VisualizeOutcome};
use markscope_stream_model::LandmarkKey;

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    landmark: String,
    plane: String,
    output: PathBuf,
) -> anyhow::Result<()> {
    let key: LandmarkKey = landmark.parse()?;
    let plane: Plane = plane.parse()?;

    let stream = super::load_session(&path)?;
    let mut console = super::console_for_stream(config, &stream, false, None);
    let summary = replay_stream(&mut console, &stream.samples, false).await;

    println!(
        "Replayed {} samples; history buffer holds {}",
        summary.fed,
        console.history_len()
    );

    let (h, v) = plane.axis_labels();
    match visualize_landmark(&mut console, &key, plane, &output)? {
        VisualizeOutcome::Written(file) => {
            println!("Trajectory for {key} ({h}/{v} plane) written to: {}", file.display());
        }
        VisualizeOutcome::NotEnoughData => {
            println!("Not enough buffered samples for {key}; nothing drawn.");
        }
    }

    Ok(())
}
