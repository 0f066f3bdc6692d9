//! Run a synthetic detector session through the console.

use std::path::PathBuf;

use markscope_common::config::AppConfig;
use markscope_console::export::default_device_label;
use markscope_console::router::FrameRouter;
use markscope_console::synthetic;
use markscope_console::writer::SampleWriter;
use markscope_stream_model::SampleStreamHeader;

pub fn run(
    config: &AppConfig,
    seconds: f64,
    fps: u32,
    output: Option<PathBuf>,
    changes_only: bool,
    threshold: Option<f64>,
    throttle_ms: Option<u64>,
    tail: usize,
) -> anyhow::Result<()> {
    let fps = fps.max(1);
    let throttle_ms = throttle_ms.unwrap_or(config.console.throttle_ms);

    println!("Simulating {seconds:.1}s of synthetic detections at {fps} fps");
    println!("  Throttle: {throttle_ms}ms per category");
    println!("  Changes only: {changes_only}");
    if let Some(path) = &output {
        println!("  Recording to: {}", path.display());
    }
    println!();

    let mut console = super::build_console(config, changes_only, threshold);
    let mut router = FrameRouter::new(throttle_ms);
    router.activate_all();
    console.log_system(format!("Session started ({fps} fps, {throttle_ms}ms throttle)"));

    let mut writer = match &output {
        Some(path) => {
            let header = SampleStreamHeader {
                schema_version: SampleStreamHeader::SCHEMA_VERSION.to_string(),
                epoch_wall: console.clock().epoch_wall().to_rfc3339(),
                device: default_device_label(),
                throttle_ms,
            };
            Some(SampleWriter::create(path.clone(), &header)?)
        }
        None => None,
    };

    let frame_gap_ns = 1_000_000_000u64 / u64::from(fps);
    let total_frames = (seconds * f64::from(fps)).ceil() as u64;
    let mut accepted = 0usize;

    for frame in 0..total_frames {
        let t_ns = frame * frame_gap_ns;
        let frames = synthetic::frame_at(t_ns as f64 / 1e9);

        accepted += router.route_face(&mut console, &frames.face, t_ns);
        accepted += router.route_hands(&mut console, &frames.hands, t_ns);
        accepted += router.route_pose(&mut console, &frames.pose, t_ns);

        if let Some(writer) = writer.as_mut() {
            for sample in synthetic::key_point_samples(t_ns, &frames) {
                writer.write_sample(&sample)?;
            }
        }
    }

    if let Some(mut writer) = writer.take() {
        writer.flush()?;
        println!(
            "Recorded {} raw samples to {}",
            writer.samples_written(),
            writer.path().display()
        );
    }

    println!(
        "Console accepted {accepted} samples, suppressed {}",
        console.samples_suppressed()
    );
    println!("  Landmarks tracked: {}", console.stats_report().landmark_count());
    println!();

    super::print_tail(&console, tail);
    Ok(())
}
