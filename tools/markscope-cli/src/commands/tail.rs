//! Print the last log lines of a recorded session.

use std::path::PathBuf;

use markscope_common::config::AppConfig;
use markscope_console::replay::replay_stream;

pub async fn run(config: &AppConfig, path: PathBuf, lines: usize) -> anyhow::Result<()> {
    let stream = super::load_session(&path)?;

    let mut console = super::console_for_stream(config, &stream, false, None);
    replay_stream(&mut console, &stream.samples, false).await;

    super::print_tail(&console, lines);
    Ok(())
}
