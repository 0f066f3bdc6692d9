//! Replay a recorded session through the console.

use std::path::PathBuf;

use markscope_common::config::AppConfig;
use markscope_console::replay::replay_stream;

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    realtime: bool,
    changes_only: bool,
    threshold: Option<f64>,
    tail: usize,
) -> anyhow::Result<()> {
    let stream = super::load_session(&path)?;

    println!(
        "Replaying {} ({} samples, {:.1}s)",
        path.display(),
        stream.samples.len(),
        stream.duration_secs()
    );
    if let Some(header) = &stream.header {
        println!(
            "  Recorded on: {} (throttle {}ms)",
            header.device, header.throttle_ms
        );
    }
    if realtime {
        println!("  Pacing by recorded timestamps...");
    }
    println!();

    let mut console = super::console_for_stream(config, &stream, changes_only, threshold);
    let summary = replay_stream(&mut console, &stream.samples, realtime).await;

    println!(
        "Fed {} samples: {} logged, {} suppressed",
        summary.fed, summary.logged, summary.suppressed
    );
    println!();

    super::print_tail(&console, tail);
    Ok(())
}
