//! Direction and velocity estimation against the previous accepted sample.
//!
//! Both derivations compare the incoming sample to the landmark's last
//! *accepted* observation, not the last raw detector frame. Callers must
//! therefore compute glyphs and velocity before updating the cache for
//! the current sample.

use std::collections::HashMap;

use markscope_stream_model::{Coordinate, LandmarkKey, TimestampNs};

/// The last accepted observation of a landmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviousSample {
    /// Position when the landmark was last accepted.
    pub coords: Coordinate,

    /// Monotonic timestamp of that acceptance.
    pub observed_ns: TimestampNs,
}

/// Per-landmark cache of last accepted observations.
///
/// An entry exists only after at least one sample for that key was
/// accepted. The cache persists across landmark disappearance, so a
/// landmark that re-enters the frame is still compared against its last
/// known position.
#[derive(Debug, Default)]
pub struct PreviousValueCache {
    entries: HashMap<LandmarkKey, PreviousSample>,
}

impl PreviousValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted observation for a landmark, if any.
    pub fn get(&self, key: &LandmarkKey) -> Option<&PreviousSample> {
        self.entries.get(key)
    }

    /// Record an accepted sample, replacing any previous observation.
    pub fn observe(&mut self, key: LandmarkKey, coords: Coordinate, observed_ns: TimestampNs) {
        self.entries.insert(
            key,
            PreviousSample {
                coords,
                observed_ns,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-axis speed of a landmark in normalized units per second.
///
/// Components are absolute values; direction lives in the glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Velocity {
    /// Euclidean magnitude of the velocity vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Movement glyphs for the axes whose delta exceeds `threshold`.
///
/// `→`/`←` for x, `↓`/`↑` for y (camera space grows downward), `↗`/`↘`
/// for z (toward/away from the camera). Axes combine in x, y, z order;
/// the empty string means no axis moved beyond the threshold, or there
/// was no previous observation to compare against.
pub fn direction_glyphs(
    previous: Option<&PreviousSample>,
    coords: &Coordinate,
    threshold: f64,
) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    let prev = prev.coords;

    let mut glyphs = String::new();
    if coords.x - prev.x > threshold {
        glyphs.push('→');
    } else if prev.x - coords.x > threshold {
        glyphs.push('←');
    }
    if coords.y - prev.y > threshold {
        glyphs.push('↓');
    } else if prev.y - coords.y > threshold {
        glyphs.push('↑');
    }
    if coords.z - prev.z > threshold {
        glyphs.push('↗');
    } else if prev.z - coords.z > threshold {
        glyphs.push('↘');
    }
    glyphs
}

/// Velocity of the current sample relative to the previous observation.
///
/// `None` when this is the landmark's first observation or when time
/// did not advance since the previous one.
pub fn velocity_between(
    previous: Option<&PreviousSample>,
    coords: &Coordinate,
    now_ns: TimestampNs,
) -> Option<Velocity> {
    let prev = previous?;
    if now_ns <= prev.observed_ns {
        return None;
    }
    let dt_secs = (now_ns - prev.observed_ns) as f64 / 1_000_000_000.0;
    Some(Velocity {
        x: ((coords.x - prev.coords.x) / dt_secs).abs(),
        y: ((coords.y - prev.coords.y) / dt_secs).abs(),
        z: ((coords.z - prev.coords.z) / dt_secs).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use markscope_stream_model::Category;

    fn key() -> LandmarkKey {
        LandmarkKey::new(Category::Pose, "left_wrist", 15)
    }

    fn prev_at(x: f64, y: f64, z: f64, observed_ns: TimestampNs) -> PreviousSample {
        PreviousSample {
            coords: Coordinate::new(x, y, z),
            observed_ns,
        }
    }

    #[test]
    fn test_first_observation_has_no_velocity() {
        let coords = Coordinate::new(0.5, 0.5, 0.0);
        assert_eq!(velocity_between(None, &coords, 1_000_000_000), None);
    }

    #[test]
    fn test_velocity_magnitude() {
        // 0.2 normalized units in 2 seconds = 0.1 units/sec on x.
        let prev = prev_at(0.3, 0.5, 0.0, 0);
        let coords = Coordinate::new(0.5, 0.5, 0.0);
        let velocity = velocity_between(Some(&prev), &coords, 2_000_000_000).unwrap();
        assert!((velocity.x - 0.1).abs() < 1e-9);
        assert!(velocity.y.abs() < 1e-9);
        assert!((velocity.magnitude() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_components_are_absolute() {
        let prev = prev_at(0.5, 0.5, 0.0, 0);
        let coords = Coordinate::new(0.3, 0.5, 0.0); // moving left
        let velocity = velocity_between(Some(&prev), &coords, 1_000_000_000).unwrap();
        assert!(velocity.x > 0.0);
    }

    #[test]
    fn test_velocity_requires_time_to_advance() {
        let prev = prev_at(0.3, 0.5, 0.0, 1_000_000_000);
        let coords = Coordinate::new(0.5, 0.5, 0.0);
        assert_eq!(velocity_between(Some(&prev), &coords, 1_000_000_000), None);
        assert_eq!(velocity_between(Some(&prev), &coords, 500_000_000), None);
    }

    #[test]
    fn test_glyphs_single_axis() {
        let threshold = 0.015;
        let prev = prev_at(0.5, 0.5, 0.0, 0);
        let cases = [
            (Coordinate::new(0.6, 0.5, 0.0), "→"),
            (Coordinate::new(0.4, 0.5, 0.0), "←"),
            (Coordinate::new(0.5, 0.6, 0.0), "↓"),
            (Coordinate::new(0.5, 0.4, 0.0), "↑"),
            (Coordinate::new(0.5, 0.5, 0.1), "↗"),
            (Coordinate::new(0.5, 0.5, -0.1), "↘"),
        ];
        for (coords, expected) in cases {
            assert_eq!(direction_glyphs(Some(&prev), &coords, threshold), expected);
        }
    }

    #[test]
    fn test_glyphs_combine_in_axis_order() {
        let prev = prev_at(0.5, 0.5, 0.0, 0);
        let coords = Coordinate::new(0.6, 0.4, 0.1);
        assert_eq!(direction_glyphs(Some(&prev), &coords, 0.015), "→↑↗");
    }

    #[test]
    fn test_glyphs_empty_without_previous_or_motion() {
        let coords = Coordinate::new(0.5, 0.5, 0.0);
        assert_eq!(direction_glyphs(None, &coords, 0.015), "");

        let prev = prev_at(0.5, 0.5, 0.0, 0);
        let near = Coordinate::new(0.505, 0.495, 0.001);
        assert_eq!(direction_glyphs(Some(&prev), &near, 0.015), "");
    }

    #[test]
    fn test_cache_observe_and_clear() {
        let mut cache = PreviousValueCache::new();
        assert!(cache.get(&key()).is_none());

        cache.observe(key(), Coordinate::new(0.1, 0.2, 0.3), 42);
        let prev = cache.get(&key()).unwrap();
        assert_eq!(prev.observed_ns, 42);
        assert!((prev.coords.x - 0.1).abs() < 1e-12);

        cache.observe(key(), Coordinate::new(0.5, 0.5, 0.5), 100);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key()).unwrap().observed_ns, 100);

        cache.clear();
        assert!(cache.is_empty());
    }
}
