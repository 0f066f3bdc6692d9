//! Markscope Analysis
//!
//! Analyzes landmark sample streams to derive logging decisions:
//! - **Change filtering:** Decide whether a sample moved enough to log
//! - **Motion:** Direction glyphs and velocity against the previous sample
//! - **Statistics:** Running per-landmark ranges and velocity aggregates
//! - **Trajectory:** Resolution-independent render plans for movement plots
//!
//! The crate holds no I/O and no platform dependencies: callers feed
//! samples in and read decisions back out.

pub mod change;
pub mod motion;
pub mod stats;
pub mod trajectory;

pub use change::ChangeFilter;
pub use motion::{PreviousSample, PreviousValueCache, Velocity};
pub use stats::{RunningStats, StatsAggregator, StatsReport};
pub use trajectory::{plan_trajectory, Plane, PlotLayout, TrajectoryPlan};
