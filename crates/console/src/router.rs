//! Fan-out of raw detector frames into console samples.
//!
//! A detector reports every point of its topology for each camera
//! frame. The router keeps per-detector active flags and throttle
//! gates, selects the catalog key points, names them, and feeds the
//! console. Throttling drops whole frames per category, never
//! individual points, so a logged batch is always internally
//! consistent.

use markscope_common::clock::ThrottleGate;
use markscope_stream_model::catalog::{
    self, Handedness, FACE_KEY_LANDMARKS, HAND_KEY_POINTS, POSE_KEY_POINTS,
};
use markscope_stream_model::{Category, Coordinate, LandmarkKey, TimestampNs};

use crate::{Console, IngestOutcome};

/// One detected hand: its side plus the full 21-point topology.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    pub handedness: Handedness,
    pub points: Vec<Coordinate>,
}

/// Routes detector frames into a console.
#[derive(Debug)]
pub struct FrameRouter {
    face_active: bool,
    hands_active: bool,
    pose_active: bool,
    face_gate: ThrottleGate,
    hands_gate: ThrottleGate,
    pose_gate: ThrottleGate,
}

impl FrameRouter {
    /// Create a router with all detectors inactive.
    pub fn new(throttle_ms: u64) -> Self {
        Self {
            face_active: false,
            hands_active: false,
            pose_active: false,
            face_gate: ThrottleGate::from_millis(throttle_ms),
            hands_gate: ThrottleGate::from_millis(throttle_ms),
            pose_gate: ThrottleGate::from_millis(throttle_ms),
        }
    }

    pub fn is_face_active(&self) -> bool {
        self.face_active
    }

    pub fn is_hands_active(&self) -> bool {
        self.hands_active
    }

    pub fn is_pose_active(&self) -> bool {
        self.pose_active
    }

    /// Flip face routing; returns the new state.
    pub fn toggle_face(&mut self) -> bool {
        self.face_active = !self.face_active;
        tracing::debug!(active = self.face_active, "face routing toggled");
        self.face_active
    }

    /// Flip hand routing; returns the new state.
    pub fn toggle_hands(&mut self) -> bool {
        self.hands_active = !self.hands_active;
        tracing::debug!(active = self.hands_active, "hand routing toggled");
        self.hands_active
    }

    /// Flip pose routing; returns the new state.
    pub fn toggle_pose(&mut self) -> bool {
        self.pose_active = !self.pose_active;
        tracing::debug!(active = self.pose_active, "pose routing toggled");
        self.pose_active
    }

    /// Activate every detector.
    pub fn activate_all(&mut self) {
        self.face_active = true;
        self.hands_active = true;
        self.pose_active = true;
    }

    /// Deactivate every detector (camera stop).
    pub fn reset_all(&mut self) {
        self.face_active = false;
        self.hands_active = false;
        self.pose_active = false;
    }

    /// Route one face-mesh frame. `points` is the full mesh indexed by
    /// topology position; only catalog key landmarks are logged.
    /// Returns the number of samples the console accepted.
    pub fn route_face(
        &mut self,
        console: &mut Console,
        points: &[Coordinate],
        now_ns: TimestampNs,
    ) -> usize {
        if !self.face_active || points.is_empty() || !self.face_gate.should_pass(now_ns) {
            return 0;
        }

        let mut logged = 0;
        for (index, name) in FACE_KEY_LANDMARKS {
            if let Some(coords) = points.get(index as usize) {
                let key = LandmarkKey::new(Category::Face, name, index);
                if console.log_sample_at(key, coords.without_visibility(), now_ns)
                    == IngestOutcome::Logged
                {
                    logged += 1;
                }
            }
        }
        tracing::trace!(logged, "face frame routed");
        logged
    }

    /// Route one hands frame (zero or more detected hands). Landmark
    /// names get the handedness prefix, e.g. `Right index_tip`.
    pub fn route_hands(
        &mut self,
        console: &mut Console,
        hands: &[HandFrame],
        now_ns: TimestampNs,
    ) -> usize {
        if !self.hands_active || hands.is_empty() || !self.hands_gate.should_pass(now_ns) {
            return 0;
        }

        let mut logged = 0;
        for hand in hands {
            for index in HAND_KEY_POINTS {
                let (Some(coords), Some(name)) = (
                    hand.points.get(index as usize),
                    catalog::hand_landmark_name(index),
                ) else {
                    continue;
                };
                let key = LandmarkKey::new(
                    Category::Hand,
                    format!("{} {}", hand.handedness.label(), name),
                    index,
                );
                if console.log_sample_at(key, coords.without_visibility(), now_ns)
                    == IngestOutcome::Logged
                {
                    logged += 1;
                }
            }
        }
        tracing::trace!(logged, hands = hands.len(), "hand frame routed");
        logged
    }

    /// Route one pose frame. Pose points keep their visibility score.
    pub fn route_pose(
        &mut self,
        console: &mut Console,
        points: &[Coordinate],
        now_ns: TimestampNs,
    ) -> usize {
        if !self.pose_active || points.is_empty() || !self.pose_gate.should_pass(now_ns) {
            return 0;
        }

        let mut logged = 0;
        for index in POSE_KEY_POINTS {
            let (Some(coords), Some(name)) =
                (points.get(index as usize), catalog::pose_landmark_name(index))
            else {
                continue;
            };
            let key = LandmarkKey::new(Category::Pose, name, index);
            if console.log_sample_at(key, *coords, now_ns) == IngestOutcome::Logged {
                logged += 1;
            }
        }
        tracing::trace!(logged, "pose frame routed");
        logged
    }
}
