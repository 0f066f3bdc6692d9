//! Export a recorded session's log to CSV or JSON.

use std::path::PathBuf;

use markscope_common::config::AppConfig;
use markscope_console::export::{
    default_device_label, export_log, ExportFormat, ExportOutcome, ExportSettings,
};
use markscope_console::replay::replay_stream;
use markscope_console::store::CategoryFilters;
use markscope_stream_model::Category;

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    only: Vec<String>,
) -> anyhow::Result<()> {
    let format: ExportFormat = format.parse()?;

    let stream = super::load_session(&path)?;
    println!(
        "Exporting {} ({} samples)",
        path.display(),
        stream.samples.len()
    );

    let mut console = super::console_for_stream(config, &stream, false, None);
    replay_stream(&mut console, &stream.samples, false).await;

    if !only.is_empty() {
        let categories: Vec<Category> = only
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_, _>>()?;
        println!(
            "  Categories: {}",
            categories
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join(", ")
        );
        console.set_filters(CategoryFilters::only(&categories));
    }

    let settings = ExportSettings {
        output_dir: output.unwrap_or_else(|| config.output_dir.clone()),
        device: stream
            .header
            .as_ref()
            .map(|h| h.device.clone())
            .unwrap_or_else(default_device_label),
    };

    match export_log(&mut console, format, &settings)? {
        ExportOutcome::Written(file) => println!("Export written to: {}", file.display()),
        ExportOutcome::NothingToExport => println!("No landmark data to export."),
    }

    Ok(())
}
