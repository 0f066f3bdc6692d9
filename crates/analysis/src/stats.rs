//! Running per-landmark statistics.
//!
//! Statistics fold in every *accepted* sample — observations the change
//! filter suppressed never reach the aggregator. Coordinate ranges seed
//! from the first accepted position so a landmark with one sample has
//! `min == max` on every axis.

use std::collections::HashMap;

use markscope_stream_model::{Category, Coordinate, LandmarkKey};

/// Aggregate statistics for one landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStats {
    /// Number of accepted samples.
    pub count: u64,

    /// Coordinate ranges across all accepted samples.
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,

    /// Sum of velocity magnitudes, for the running average.
    pub total_velocity: f64,

    /// Largest velocity magnitude seen.
    pub max_velocity: f64,
}

impl RunningStats {
    fn seeded(coords: &Coordinate) -> Self {
        Self {
            count: 0,
            min_x: coords.x,
            max_x: coords.x,
            min_y: coords.y,
            max_y: coords.y,
            min_z: coords.z,
            max_z: coords.z,
            total_velocity: 0.0,
            max_velocity: 0.0,
        }
    }

    /// Average velocity magnitude over all accepted samples. Samples
    /// without a computable velocity still count toward the divisor.
    pub fn avg_velocity(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_velocity / self.count as f64
        }
    }
}

/// Statistics keyed by landmark identity.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: HashMap<LandmarkKey, RunningStats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an accepted sample into the landmark's running stats.
    /// `velocity_magnitude` is `None` for first observations.
    pub fn update(
        &mut self,
        key: &LandmarkKey,
        coords: &Coordinate,
        velocity_magnitude: Option<f64>,
    ) {
        let stats = self
            .stats
            .entry(key.clone())
            .or_insert_with(|| RunningStats::seeded(coords));

        stats.count += 1;
        stats.min_x = stats.min_x.min(coords.x);
        stats.max_x = stats.max_x.max(coords.x);
        stats.min_y = stats.min_y.min(coords.y);
        stats.max_y = stats.max_y.max(coords.y);
        stats.min_z = stats.min_z.min(coords.z);
        stats.max_z = stats.max_z.max(coords.z);

        if let Some(magnitude) = velocity_magnitude {
            stats.total_velocity += magnitude;
            stats.max_velocity = stats.max_velocity.max(magnitude);
        }
    }

    /// Running stats for one landmark, if it has been seen.
    pub fn get(&self, key: &LandmarkKey) -> Option<&RunningStats> {
        self.stats.get(key)
    }

    /// Number of distinct landmarks tracked.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn clear(&mut self) {
        self.stats.clear();
    }

    /// Snapshot grouped by landmark category.
    ///
    /// Every landmark category gets a group even when empty, so report
    /// renderers can show placeholders. Rows within a group are sorted
    /// by name, then index, for stable output.
    pub fn report(&self) -> StatsReport {
        let groups = Category::LANDMARK
            .iter()
            .map(|&category| {
                let mut rows: Vec<StatsRow> = self
                    .stats
                    .iter()
                    .filter(|(key, _)| key.category == category)
                    .map(|(key, stats)| StatsRow {
                        name: key.name.clone(),
                        index: key.index,
                        stats: stats.clone(),
                    })
                    .collect();
                rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.index.cmp(&b.index)));
                CategoryGroup { category, rows }
            })
            .collect();

        StatsReport { groups }
    }
}

/// Snapshot of all landmark statistics, grouped per category.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub groups: Vec<CategoryGroup>,
}

/// One category's landmarks with their running stats.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: Category,
    pub rows: Vec<StatsRow>,
}

/// One landmark's row in the report.
#[derive(Debug, Clone)]
pub struct StatsRow {
    pub name: String,
    pub index: u32,
    pub stats: RunningStats,
}

impl StatsReport {
    /// Whether no landmark has been tracked at all.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.rows.is_empty())
    }

    /// Total number of landmarks across all groups.
    pub fn landmark_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wrist() -> LandmarkKey {
        LandmarkKey::new(Category::Pose, "left_wrist", 15)
    }

    #[test]
    fn test_single_sample_seeds_ranges() {
        let mut agg = StatsAggregator::new();
        agg.update(&wrist(), &Coordinate::new(0.3, 0.6, -0.1), None);

        let stats = agg.get(&wrist()).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min_x, stats.max_x);
        assert_eq!(stats.min_y, stats.max_y);
        assert_eq!(stats.min_z, stats.max_z);
        assert!((stats.min_x - 0.3).abs() < 1e-12);
        assert_eq!(stats.avg_velocity(), 0.0);
    }

    #[test]
    fn test_ranges_widen_and_velocity_accumulates() {
        let mut agg = StatsAggregator::new();
        agg.update(&wrist(), &Coordinate::new(0.3, 0.6, 0.0), None);
        agg.update(&wrist(), &Coordinate::new(0.5, 0.4, 0.0), Some(0.2));
        agg.update(&wrist(), &Coordinate::new(0.4, 0.5, 0.0), Some(0.4));

        let stats = agg.get(&wrist()).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.min_x - 0.3).abs() < 1e-12);
        assert!((stats.max_x - 0.5).abs() < 1e-12);
        assert!((stats.min_y - 0.4).abs() < 1e-12);
        assert!((stats.max_y - 0.6).abs() < 1e-12);
        assert!((stats.max_velocity - 0.4).abs() < 1e-12);
        // total 0.6 over 3 samples, including the velocity-less first one
        assert!((stats.avg_velocity() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_landmarks_aggregate_independently() {
        let mut agg = StatsAggregator::new();
        let nose = LandmarkKey::new(Category::Face, "nose tip", 0);
        agg.update(&wrist(), &Coordinate::new(0.2, 0.2, 0.0), None);
        agg.update(&nose, &Coordinate::new(0.8, 0.8, 0.0), None);

        assert_eq!(agg.len(), 2);
        assert!((agg.get(&wrist()).unwrap().max_x - 0.2).abs() < 1e-12);
        assert!((agg.get(&nose).unwrap().max_x - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_report_groups_and_sorts() {
        let mut agg = StatsAggregator::new();
        agg.update(
            &LandmarkKey::new(Category::Pose, "right_wrist", 16),
            &Coordinate::new(0.5, 0.5, 0.0),
            None,
        );
        agg.update(
            &LandmarkKey::new(Category::Pose, "left_wrist", 15),
            &Coordinate::new(0.5, 0.5, 0.0),
            None,
        );
        agg.update(
            &LandmarkKey::new(Category::Hand, "Right wrist", 0),
            &Coordinate::new(0.5, 0.5, 0.0),
            None,
        );

        let report = agg.report();
        assert_eq!(report.groups.len(), Category::LANDMARK.len());
        assert_eq!(report.landmark_count(), 3);

        let pose_group = report
            .groups
            .iter()
            .find(|g| g.category == Category::Pose)
            .unwrap();
        assert_eq!(pose_group.rows.len(), 2);
        assert_eq!(pose_group.rows[0].name, "left_wrist");
        assert_eq!(pose_group.rows[1].name, "right_wrist");

        let face_group = report
            .groups
            .iter()
            .find(|g| g.category == Category::Face)
            .unwrap();
        assert!(face_group.rows.is_empty());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut agg = StatsAggregator::new();
        agg.update(&wrist(), &Coordinate::new(0.5, 0.5, 0.0), Some(1.0));
        agg.clear();
        assert!(agg.is_empty());
        assert!(agg.report().is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranges_stay_ordered_and_avg_below_max(
            samples in prop::collection::vec(
                (0.0f64..1.0, 0.0f64..1.0, -0.5f64..0.5, prop::option::of(0.0f64..5.0)),
                1..50,
            )
        ) {
            let mut agg = StatsAggregator::new();
            for (x, y, z, velocity) in &samples {
                agg.update(&wrist(), &Coordinate::new(*x, *y, *z), *velocity);
            }

            let stats = agg.get(&wrist()).unwrap();
            prop_assert_eq!(stats.count, samples.len() as u64);
            prop_assert!(stats.min_x <= stats.max_x);
            prop_assert!(stats.min_y <= stats.max_y);
            prop_assert!(stats.min_z <= stats.max_z);
            prop_assert!(stats.avg_velocity() <= stats.max_velocity + 1e-9);
        }
    }
}
