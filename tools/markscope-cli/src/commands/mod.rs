//! Subcommand implementations.

pub mod export;
pub mod plot;
pub mod replay;
pub mod simulate;
pub mod stats;
pub mod tail;

use std::path::Path;

use markscope_common::clock::SessionClock;
use markscope_common::config::{AppConfig, ConsoleConfig};
use markscope_console::Console;
use markscope_stream_model::{SampleStream, SampleStreamHeader};

fn merged_config(config: &AppConfig, changes_only: bool, threshold: Option<f64>) -> ConsoleConfig {
    let mut console_config = config.console.clone();
    if changes_only {
        console_config.show_changes_only = true;
    }
    if let Some(threshold) = threshold {
        console_config.position_threshold = threshold;
    }
    // Out-of-range thresholds are clamped by the console itself.
    console_config
}

/// Build a console from the app config plus command-line overrides.
pub(crate) fn build_console(
    config: &AppConfig,
    changes_only: bool,
    threshold: Option<f64>,
) -> Console {
    Console::new(merged_config(config, changes_only, threshold))
}

/// Build a console for a loaded recording. When the recording carries a
/// header, the clock is anchored to the recorded wall epoch so entry
/// timestamps show the original session's time of day.
pub(crate) fn console_for_stream(
    config: &AppConfig,
    stream: &SampleStream,
    changes_only: bool,
    threshold: Option<f64>,
) -> Console {
    let clock = stream
        .header
        .as_ref()
        .and_then(SampleStreamHeader::wall_epoch)
        .map(SessionClock::from_wall_epoch)
        .unwrap_or_else(SessionClock::start);
    Console::with_clock(merged_config(config, changes_only, threshold), clock)
}

/// Load a recorded session file.
pub(crate) fn load_session(path: &Path) -> anyhow::Result<SampleStream> {
    SampleStream::load(path).map_err(|e| anyhow::anyhow!("Failed to load session: {e}"))
}

/// Print the last `lines` visible log lines of a console.
pub(crate) fn print_tail(console: &Console, lines: usize) {
    if lines == 0 {
        return;
    }
    let text = console.visible_text();
    if text.is_empty() {
        println!("(log is empty)");
        return;
    }
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    println!("Last {} log entries:", all.len() - start);
    for line in &all[start..] {
        println!("  {line}");
    }
}
