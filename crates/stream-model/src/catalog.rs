//! Landmark catalogs for the supported detector topologies.
//!
//! Index/name pairs follow the MediaPipe FaceMesh, Hands, and Pose
//! topologies. The face mesh has 468 points; only a curated subset is
//! worth logging. Hands and poses log a fixed key-point selection out
//! of their full topologies.

use serde::{Deserialize, Serialize};

/// Curated FaceMesh points, ordered by mesh index.
pub const FACE_KEY_LANDMARKS: [(u32, &str); 15] = [
    (0, "nose tip"),
    (5, "forehead"),
    (13, "upper lip"),
    (14, "lower lip"),
    (33, "left cheek"),
    (58, "left ear"),
    (61, "left eye inner"),
    (133, "left eye outer"),
    (152, "chin"),
    (156, "right eyebrow"),
    (234, "left eyebrow"),
    (263, "right cheek"),
    (291, "right eye inner"),
    (323, "right ear"),
    (362, "right eye outer"),
];

/// Number of points in the full face mesh topology.
pub const FACE_MESH_POINTS: usize = 468;

/// The 21 hand landmark names, indexed by hand topology position.
pub const HAND_LANDMARKS: [&str; 21] = [
    "wrist",
    "thumb_cmc",
    "thumb_mcp",
    "thumb_ip",
    "thumb_tip",
    "index_mcp",
    "index_pip",
    "index_dip",
    "index_tip",
    "middle_mcp",
    "middle_pip",
    "middle_dip",
    "middle_tip",
    "ring_mcp",
    "ring_pip",
    "ring_dip",
    "ring_tip",
    "pinky_mcp",
    "pinky_pip",
    "pinky_dip",
    "pinky_tip",
];

/// Wrist plus fingertips: the hand points logged per frame.
pub const HAND_KEY_POINTS: [u32; 6] = [0, 4, 8, 12, 16, 20];

/// The 33 pose landmark names, indexed by pose topology position.
pub const POSE_LANDMARKS: [&str; 33] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

/// Head, torso, and limb joints: the pose points logged per frame.
pub const POSE_KEY_POINTS: [u32; 13] = [0, 11, 12, 13, 14, 15, 16, 23, 24, 25, 26, 27, 28];

/// Which hand a set of hand landmarks belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Label prefixed to hand landmark names, e.g. `Right wrist`.
    pub fn label(self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// Name of a curated face mesh point, if the index is in the catalog.
pub fn face_landmark_name(index: u32) -> Option<&'static str> {
    FACE_KEY_LANDMARKS
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, name)| *name)
}

/// Name of a hand topology point.
pub fn hand_landmark_name(index: u32) -> Option<&'static str> {
    HAND_LANDMARKS.get(index as usize).copied()
}

/// Name of a pose topology point.
pub fn pose_landmark_name(index: u32) -> Option<&'static str> {
    POSE_LANDMARKS.get(index as usize).copied()
}
