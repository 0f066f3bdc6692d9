//! Markscope Console
//!
//! The stateful landmark logging engine. Feeds of detector samples (or
//! grammar-formatted message text) pass through change filtering, gain
//! movement glyphs and velocity relative to the previous accepted
//! position, and land in bounded entry and history stores with running
//! per-landmark statistics. Reading back is category-filtered; exports
//! and trajectory plots build on the same state.
//!
//! The console is single-threaded by design — one `&mut Console` per
//! session. Drivers that need pacing (replay, live capture) own the
//! async loop and feed the console from it.

pub mod export;
pub mod replay;
pub mod router;
pub mod store;
pub mod synthetic;
pub mod writer;

use chrono::{DateTime, Local, Utc};

use markscope_analysis::change::ChangeFilter;
use markscope_analysis::motion::{
    direction_glyphs, velocity_between, PreviousSample, PreviousValueCache,
};
use markscope_analysis::stats::{StatsAggregator, StatsReport};
use markscope_common::clock::SessionClock;
use markscope_common::config::{ConsoleConfig, POSITION_THRESHOLD_MAX, POSITION_THRESHOLD_MIN};
use markscope_stream_model::{
    message, Category, Coordinate, LandmarkKey, LogEntry, Sample, TimestampNs,
};
use std::collections::VecDeque;

use store::{CategoryFilters, LogStore};

/// Result of feeding one sample into the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The sample produced a log entry.
    Logged,
    /// The change filter rejected the sample; no state changed.
    Suppressed,
}

/// The landmark logging console.
pub struct Console {
    config: ConsoleConfig,
    clock: SessionClock,
    filter: ChangeFilter,
    cache: PreviousValueCache,
    stats: StatsAggregator,
    store: LogStore,
    history: VecDeque<Sample>,
    filters: CategoryFilters,
    samples_logged: u64,
    samples_suppressed: u64,
}

impl Console {
    /// Create a console with a fresh session clock.
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_clock(config, SessionClock::start())
    }

    /// Create a console with an explicit clock (replay and tests).
    pub fn with_clock(config: ConsoleConfig, clock: SessionClock) -> Self {
        let config = config.normalized();
        Self {
            filter: ChangeFilter::new(config.show_changes_only, config.position_threshold),
            cache: PreviousValueCache::new(),
            stats: StatsAggregator::new(),
            store: LogStore::new(config.max_log_entries),
            history: VecDeque::new(),
            filters: CategoryFilters::default(),
            samples_logged: 0,
            samples_suppressed: 0,
            config,
            clock,
        }
    }

    /// Log a structured sample stamped with the session clock.
    pub fn log_sample(&mut self, key: LandmarkKey, coords: Coordinate) -> IngestOutcome {
        let now = self.clock.elapsed_ns();
        self.log_sample_at(key, coords, now)
    }

    /// Log a structured sample with an explicit monotonic timestamp.
    ///
    /// The pipeline evaluates the change filter, movement glyphs, and
    /// velocity against the landmark's previous *accepted* observation,
    /// then updates the cache exactly once. A suppressed sample leaves
    /// every piece of console state untouched.
    pub fn log_sample_at(
        &mut self,
        key: LandmarkKey,
        coords: Coordinate,
        timestamp_ns: TimestampNs,
    ) -> IngestOutcome {
        let previous: Option<PreviousSample> = self.cache.get(&key).copied();

        if !self
            .filter
            .accepts(previous.as_ref().map(|p| &p.coords), &coords)
        {
            self.samples_suppressed += 1;
            tracing::trace!(landmark = %key, "sample below change threshold");
            return IngestOutcome::Suppressed;
        }

        let movement = direction_glyphs(previous.as_ref(), &coords, self.filter.threshold());
        let velocity = velocity_between(previous.as_ref(), &coords, timestamp_ns);
        let magnitude = velocity.map(|v| v.magnitude());

        self.cache.observe(key.clone(), coords, timestamp_ns);
        self.stats.update(&key, &coords, magnitude);

        let wall = self.clock.wall_at(timestamp_ns);
        let entry = LogEntry {
            category: key.category,
            timestamp_ns,
            wall,
            display_timestamp: self.display_timestamp(wall),
            message: message::render_message(&key.name, key.index, &coords),
            key: Some(key.clone()),
            coords: Some(coords),
            velocity: magnitude,
            movement,
        };
        self.store.push(entry);

        self.history.push_back(Sample::new(timestamp_ns, key, coords));
        while self.history.len() > self.config.history_buffer_size {
            self.history.pop_front();
        }

        self.samples_logged += 1;
        IngestOutcome::Logged
    }

    /// Log message text for a category, stamped with the session clock.
    pub fn log_text(&mut self, category: Category, text: &str) -> IngestOutcome {
        let now = self.clock.elapsed_ns();
        self.log_text_at(category, text, now)
    }

    /// Log message text with an explicit monotonic timestamp.
    ///
    /// Landmark categories get a grammar parse; a match routes through
    /// the structured pipeline (so filtering, motion, and stats apply),
    /// anything else is stored as a plain entry.
    pub fn log_text_at(
        &mut self,
        category: Category,
        text: &str,
        timestamp_ns: TimestampNs,
    ) -> IngestOutcome {
        if category.is_landmark() {
            if let Some(parsed) = message::parse_message(text) {
                let key = LandmarkKey::new(category, parsed.name, parsed.index);
                return self.log_sample_at(key, parsed.coords, timestamp_ns);
            }
        }
        self.push_status(category, text.to_string(), timestamp_ns);
        IngestOutcome::Logged
    }

    /// Append a System entry.
    pub fn log_system(&mut self, message: impl Into<String>) {
        let now = self.clock.elapsed_ns();
        self.push_status(Category::System, message.into(), now);
    }

    /// Append an Error entry.
    pub fn log_error(&mut self, message: impl Into<String>) {
        let now = self.clock.elapsed_ns();
        self.push_status(Category::Error, message.into(), now);
    }

    fn push_status(&mut self, category: Category, message: String, timestamp_ns: TimestampNs) {
        let wall = self.clock.wall_at(timestamp_ns);
        self.store.push(LogEntry::status(
            category,
            timestamp_ns,
            wall,
            self.display_timestamp(wall),
            message,
        ));
    }

    fn display_timestamp(&self, wall: DateTime<Utc>) -> String {
        let local = wall.with_timezone(&Local);
        if self.config.show_milliseconds {
            local.format("%H:%M:%S%.3f").to_string()
        } else {
            local.format("%H:%M:%S").to_string()
        }
    }

    /// Wipe entries, history, statistics, and the previous-value cache,
    /// then append a confirmation entry.
    pub fn clear(&mut self) {
        self.store.clear();
        self.history.clear();
        self.stats.clear();
        self.cache.clear();

        let now = self.clock.elapsed_ns();
        self.push_status(Category::System, "Log cleared".to_string(), now);
        tracing::debug!("console cleared");
    }

    // ---- knobs -----------------------------------------------------

    /// Enable or disable change-only logging.
    pub fn set_changes_only(&mut self, enabled: bool) {
        self.config.show_changes_only = enabled;
        self.filter.set_enabled(enabled);
    }

    /// Set the change threshold, clamped into the supported range.
    pub fn set_position_threshold(&mut self, threshold: f64) {
        let threshold = threshold.clamp(POSITION_THRESHOLD_MIN, POSITION_THRESHOLD_MAX);
        self.config.position_threshold = threshold;
        self.filter.set_threshold(threshold);
    }

    /// Toggle millisecond precision on future display timestamps.
    pub fn set_show_milliseconds(&mut self, show: bool) {
        self.config.show_milliseconds = show;
    }

    /// Show or hide a category at read time.
    pub fn set_category_visible(&mut self, category: Category, visible: bool) {
        self.filters.set_visible(category, visible);
    }

    /// Flip a category's visibility; returns the new state.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        self.filters.toggle(category)
    }

    /// Replace all visibility filters at once.
    pub fn set_filters(&mut self, filters: CategoryFilters) {
        self.filters = filters;
    }

    // ---- accessors -------------------------------------------------

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn filters(&self) -> &CategoryFilters {
        &self.filters
    }

    /// All stored entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.store.iter()
    }

    /// Stored entries whose category is currently visible.
    pub fn visible_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.store
            .iter()
            .filter(|entry| self.filters.is_visible(entry.category))
    }

    /// The most recent entry regardless of visibility.
    pub fn last_entry(&self) -> Option<&LogEntry> {
        self.store.last()
    }

    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Render all visible entries as text, one display line per entry
    /// (the clipboard-copy view).
    pub fn visible_text(&self) -> String {
        self.visible_entries()
            .map(LogEntry::display_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The trajectory history buffer, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Sample> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Chronological history for one landmark.
    pub fn history_for(&self, key: &LandmarkKey) -> Vec<Sample> {
        self.history
            .iter()
            .filter(|sample| &sample.key == key)
            .cloned()
            .collect()
    }

    /// Snapshot of per-landmark statistics, grouped by category.
    pub fn stats_report(&self) -> StatsReport {
        self.stats.report()
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Samples accepted into the log this session.
    pub fn samples_logged(&self) -> u64 {
        self.samples_logged
    }

    /// Samples rejected by the change filter this session.
    pub fn samples_suppressed(&self) -> u64 {
        self.samples_suppressed
    }
}
