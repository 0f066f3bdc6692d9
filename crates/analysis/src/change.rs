//! Significance gating for incoming coordinate samples.
//!
//! High-rate detectors report landmark positions 30+ times per second,
//! most of which are sub-millimeter jitter. The change filter compares
//! each sample against the last accepted position for that landmark and
//! decides whether it is worth logging at all.

use markscope_stream_model::Coordinate;

/// Decides whether a sample differs enough from the previous accepted
/// position to be logged.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    enabled: bool,
    threshold: f64,
}

impl ChangeFilter {
    /// Create a filter. The threshold is a per-axis coordinate delta in
    /// normalized units.
    pub fn new(enabled: bool, threshold: f64) -> Self {
        Self { enabled, threshold }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Whether a sample at `coords` should be logged given the last
    /// accepted position for the same landmark.
    ///
    /// `None` for `previous` means no sample has been accepted yet;
    /// first observations always pass so the cache gets seeded. A delta
    /// exactly equal to the threshold does not pass — the comparison is
    /// strictly greater-than on any single axis.
    pub fn accepts(&self, previous: Option<&Coordinate>, coords: &Coordinate) -> bool {
        if !self.enabled {
            return true;
        }
        let Some(prev) = previous else {
            return true;
        };
        (coords.x - prev.x).abs() > self.threshold
            || (coords.y - prev.y).abs() > self.threshold
            || (coords.z - prev.z).abs() > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_disabled_filter_accepts_everything() {
        let filter = ChangeFilter::new(false, 0.015);
        let prev = Coordinate::new(0.5, 0.5, 0.0);
        let same = Coordinate::new(0.5, 0.5, 0.0);
        assert!(filter.accepts(Some(&prev), &same));
        assert!(filter.accepts(None, &same));
    }

    #[test]
    fn test_first_observation_always_passes() {
        let filter = ChangeFilter::new(true, 0.015);
        assert!(filter.accepts(None, &Coordinate::new(0.5, 0.5, 0.0)));
    }

    #[test]
    fn test_sub_threshold_delta_is_rejected() {
        let filter = ChangeFilter::new(true, 0.015);
        let prev = Coordinate::new(0.5, 0.5, 0.0);
        let near = Coordinate::new(0.51, 0.505, 0.01);
        assert!(!filter.accepts(Some(&prev), &near));
    }

    #[test]
    fn test_exact_threshold_delta_is_rejected() {
        // 0.25 and 0.75 are exactly representable, so the delta is
        // exactly the threshold rather than a rounding neighbor of it.
        let filter = ChangeFilter::new(true, 0.25);
        let prev = Coordinate::new(0.5, 0.5, 0.0);
        let edge = Coordinate::new(0.75, 0.5, 0.0);
        assert!(!filter.accepts(Some(&prev), &edge));
    }

    #[test]
    fn test_single_axis_over_threshold_passes() {
        let filter = ChangeFilter::new(true, 0.015);
        let prev = Coordinate::new(0.5, 0.5, 0.0);
        assert!(filter.accepts(Some(&prev), &Coordinate::new(0.516, 0.5, 0.0)));
        assert!(filter.accepts(Some(&prev), &Coordinate::new(0.5, 0.484, 0.0)));
        assert!(filter.accepts(Some(&prev), &Coordinate::new(0.5, 0.5, -0.016)));
    }

    #[test]
    fn test_visibility_change_alone_does_not_pass() {
        let filter = ChangeFilter::new(true, 0.015);
        let prev = Coordinate::with_visibility(0.5, 0.5, 0.0, 0.2);
        let same_pos = Coordinate::with_visibility(0.5, 0.5, 0.0, 0.99);
        assert!(!filter.accepts(Some(&prev), &same_pos));
    }

    proptest! {
        #[test]
        fn prop_large_delta_always_accepted(
            x in 0.0f64..1.0,
            y in 0.0f64..1.0,
            threshold in 0.001f64..0.05,
        ) {
            let filter = ChangeFilter::new(true, threshold);
            let prev = Coordinate::new(x, y, 0.0);
            let moved = Coordinate::new(x + threshold * 2.0, y, 0.0);
            prop_assert!(filter.accepts(Some(&prev), &moved));
        }

        #[test]
        fn prop_identical_position_never_accepted(
            x in 0.0f64..1.0,
            y in 0.0f64..1.0,
            z in -0.5f64..0.5,
            threshold in 0.001f64..0.05,
        ) {
            let filter = ChangeFilter::new(true, threshold);
            let prev = Coordinate::new(x, y, z);
            prop_assert!(!filter.accepts(Some(&prev), &prev));
        }
    }
}
