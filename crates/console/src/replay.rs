//! Replaying recorded sample streams through a console.
//!
//! Timestamps come from the recording, not the wall clock, so the
//! analysis results are identical whether or not the replay is paced.
//! Pacing only changes when entries become observable, which is what
//! live-view demos want.

use markscope_stream_model::Sample;

use crate::{Console, IngestOutcome};

/// Totals from a replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// Samples fed to the console.
    pub fed: u64,
    /// Samples the console accepted.
    pub logged: u64,
    /// Samples the change filter rejected.
    pub suppressed: u64,
}

/// Feed recorded samples through the console in file order.
///
/// With `realtime` set, recorded inter-sample gaps are slept out;
/// otherwise the whole stream is fed immediately.
pub async fn replay_stream(
    console: &mut Console,
    samples: &[Sample],
    realtime: bool,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    let mut last_ns: Option<u64> = None;

    for sample in samples {
        if realtime {
            if let Some(last) = last_ns {
                let gap_ns = sample.timestamp_ns.saturating_sub(last);
                if gap_ns > 0 {
                    tokio::time::sleep(tokio::time::Duration::from_nanos(gap_ns)).await;
                }
            }
            last_ns = Some(sample.timestamp_ns);
        }

        summary.fed += 1;
        match console.log_sample_at(sample.key.clone(), sample.coords, sample.timestamp_ns) {
            IngestOutcome::Logged => summary.logged += 1,
            IngestOutcome::Suppressed => summary.suppressed += 1,
        }
    }

    tracing::info!(
        fed = summary.fed,
        logged = summary.logged,
        suppressed = summary.suppressed,
        "replay finished"
    );
    summary
}
