//! Markscope CLI — Command-line interface for landmark session work.
//!
//! Usage:
//!   markscope simulate [OPTIONS]   Run a synthetic detector session
//!   markscope replay <PATH>        Replay a recorded session
//!   markscope stats <PATH>         Per-landmark statistics for a session
//!   markscope export <PATH>        Export a session's log to CSV or JSON
//!   markscope plot <PATH>          Render a landmark trajectory to PNG
//!   markscope tail <PATH>          Print the last log lines of a session

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "markscope",
    about = "Landmark stream logging and analysis console",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthetic detector session through the console
    Simulate {
        /// Session length in seconds
        #[arg(long, default_value = "10.0")]
        seconds: f64,

        /// Detector frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Record raw key-point samples to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Log only samples whose position changed significantly
        #[arg(long)]
        changes_only: bool,

        /// Per-axis change threshold (0.001 to 0.05)
        #[arg(long)]
        threshold: Option<f64>,

        /// Minimum interval between logged frames per category (ms)
        #[arg(long)]
        throttle_ms: Option<u64>,

        /// Log lines to print when the session ends
        #[arg(long, default_value = "10")]
        tail: usize,
    },

    /// Replay a recorded session through the console
    Replay {
        /// Path to the session file (JSONL)
        path: PathBuf,

        /// Pace samples by their recorded timestamps
        #[arg(long)]
        realtime: bool,

        /// Log only samples whose position changed significantly
        #[arg(long)]
        changes_only: bool,

        /// Per-axis change threshold (0.001 to 0.05)
        #[arg(long)]
        threshold: Option<f64>,

        /// Log lines to print when the replay ends
        #[arg(long, default_value = "10")]
        tail: usize,
    },

    /// Print per-landmark statistics for a recorded session
    Stats {
        /// Path to the session file (JSONL)
        path: PathBuf,
    },

    /// Export a recorded session's log to CSV or JSON
    Export {
        /// Path to the session file (JSONL)
        path: PathBuf,

        /// Export format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output directory (defaults to the configured session directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only these categories (face, hand, pose); repeatable
        #[arg(long)]
        only: Vec<String>,
    },

    /// Render a landmark's trajectory to a PNG
    Plot {
        /// Path to the session file (JSONL)
        path: PathBuf,

        /// Landmark selector, e.g. pose:left_wrist:15
        #[arg(short, long)]
        landmark: String,

        /// Projection plane: xy, xz, or yz
        #[arg(long, default_value = "xy")]
        plane: String,

        /// Output PNG path
        #[arg(short, long, default_value = "trajectory.png")]
        output: PathBuf,
    },

    /// Print the last log lines of a recorded session
    Tail {
        /// Path to the session file (JSONL)
        path: PathBuf,

        /// Number of lines to print
        #[arg(short = 'n', long, default_value = "20")]
        lines: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut config = markscope_common::config::AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    markscope_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Simulate {
            seconds,
            fps,
            output,
            changes_only,
            threshold,
            throttle_ms,
            tail,
        } => commands::simulate::run(
            &config,
            seconds,
            fps,
            output,
            changes_only,
            threshold,
            throttle_ms,
            tail,
        ),
        Commands::Replay {
            path,
            realtime,
            changes_only,
            threshold,
            tail,
        } => commands::replay::run(&config, path, realtime, changes_only, threshold, tail).await,
        Commands::Stats { path } => commands::stats::run(&config, path).await,
        Commands::Export {
            path,
            format,
            output,
            only,
        } => commands::export::run(&config, path, format, output, only).await,
        Commands::Plot {
            path,
            landmark,
            plane,
            output,
        } => commands::plot::run(&config, path, landmark, plane, output).await,
        Commands::Tail { path, lines } => commands::tail::run(&config, path, lines).await,
    }
}
