//! Print per-landmark statistics for a recorded session.

use std::path::PathBuf;

use markscope_common::config::AppConfig;
use markscope_console::replay::replay_stream;

pub async fn run(config: &AppConfig, path: PathBuf) -> anyhow::Result<()> {
    let stream = super::load_session(&path)?;

    let mut console = super::console_for_stream(config, &stream, false, None);
    let summary = replay_stream(&mut console, &stream.samples, false).await;

    println!(
        "Landmark Statistics: {} ({} samples over {:.1}s)",
        path.display(),
        summary.fed,
        stream.duration_secs()
    );
    println!();

    let report = console.stats_report();
    if report.is_empty() {
        println!("No landmark data available yet.");
        return Ok(());
    }

    for group in &report.groups {
        println!("{}:", group.category.label());
        if group.rows.is_empty() {
            println!(
                "  No {} landmarks have been tracked yet.",
                group.category.label()
            );
            println!();
            continue;
        }

        println!(
            "  {:<24} {:>7}  {:<15} {:<15} {:<15} {:>8} {:>8}",
            "Landmark", "Samples", "X Range", "Y Range", "Z Range", "Avg Vel", "Max Vel"
        );
        for row in &group.rows {
            let s = &row.stats;
            println!(
                "  {:<24} {:>7}  {:<15} {:<15} {:<15} {:>8.3} {:>8.3}",
                format!("{} [{}]", row.name, row.index),
                s.count,
                format!("{:.3} - {:.3}", s.min_x, s.max_x),
                format!("{:.3} - {:.3}", s.min_y, s.max_y),
                format!("{:.3} - {:.3}", s.min_z, s.max_z),
                s.avg_velocity(),
                s.max_velocity,
            );
        }
        println!();
    }

    Ok(())
}
