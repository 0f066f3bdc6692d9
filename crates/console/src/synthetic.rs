//! Deterministic synthetic detector frames.
//!
//! Drives the console without a camera: every landmark follows a slow
//! sinusoidal wander around the frame center, parameterized only by
//! time and landmark index, so two runs over the same timestamps
//! produce identical streams.

use markscope_stream_model::catalog::{
    pose_landmark_name, Handedness, FACE_KEY_LANDMARKS, FACE_MESH_POINTS, HAND_KEY_POINTS,
    HAND_LANDMARKS, POSE_KEY_POINTS, POSE_LANDMARKS,
};
use markscope_stream_model::{Category, Coordinate, LandmarkKey, Sample, TimestampNs};

use crate::router::HandFrame;

/// One full set of detector outputs for a single point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    /// Full pose topology, with visibility.
    pub pose: Vec<Coordinate>,
    /// Full face mesh, no visibility.
    pub face: Vec<Coordinate>,
    /// Detected hands, no visibility.
    pub hands: Vec<HandFrame>,
}

/// Generate the synthetic frame for `t_secs` seconds into the session.
pub fn frame_at(t_secs: f64) -> FrameSet {
    let pose = (0..POSE_LANDMARKS.len() as u32)
        .map(|index| {
            let vis = 0.88 + 0.1 * (0.5 + 0.5 * (t_secs * 0.9 + index as f64 * 0.37).sin());
            let c = wander(t_secs, index, 0.2);
            Coordinate::with_visibility(c.x, c.y, c.z, vis)
        })
        .collect();

    let face = (0..FACE_MESH_POINTS as u32)
        .map(|index| wander(t_secs, index, 0.15))
        .collect();

    let wrist = wander(t_secs, 60, 0.25);
    let points = (0..HAND_LANDMARKS.len() as u32)
        .map(|joint| {
            let spread = 0.004 * joint as f64;
            Coordinate::new(
                wrist.x + spread * (t_secs * 1.1 + joint as f64).sin(),
                wrist.y + spread * (t_secs * 1.3 + joint as f64).cos(),
                wrist.z + 0.001 * joint as f64,
            )
        })
        .collect();
    let hands = vec![HandFrame {
        handedness: Handedness::Right,
        points,
    }];

    FrameSet { pose, face, hands }
}

/// Sinusoidal wander around the frame center. The per-index phase
/// keeps neighboring landmarks from moving in lockstep.
fn wander(t_secs: f64, index: u32, spread: f64) -> Coordinate {
    let phase = index as f64 * 0.37;
    Coordinate::new(
        0.5 + spread * (t_secs * 0.8 + phase).sin(),
        0.5 + spread * (t_secs * 0.6 + phase * 1.3).cos(),
        -0.05 + 0.02 * (t_secs * 0.5 + phase).sin(),
    )
}

/// Flatten a frame set into the key-point samples a recording captures:
/// the named subset of each topology, visibility kept only for pose.
pub fn key_point_samples(t_ns: TimestampNs, frames: &FrameSet) -> Vec<Sample> {
    let mut samples = Vec::new();

    for (index, name) in FACE_KEY_LANDMARKS {
        if let Some(coords) = frames.face.get(index as usize) {
            samples.push(Sample::new(
                t_ns,
                LandmarkKey::new(Category::Face, name, index),
                coords.without_visibility(),
            ));
        }
    }

    for hand in &frames.hands {
        for index in HAND_KEY_POINTS {
            if let Some(coords) = hand.points.get(index as usize) {
                let name =
                    format!("{} {}", hand.handedness.label(), HAND_LANDMARKS[index as usize]);
                samples.push(Sample::new(
                    t_ns,
                    LandmarkKey::new(Category::Hand, name, index),
                    coords.without_visibility(),
                ));
            }
        }
    }

    for index in POSE_KEY_POINTS {
        if let Some(coords) = frames.pose.get(index as usize) {
            if let Some(name) = pose_landmark_name(index) {
                samples.push(Sample::new(
                    t_ns,
                    LandmarkKey::new(Category::Pose, name, index),
                    *coords,
                ));
            }
        }
    }

    samples
}
