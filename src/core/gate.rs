//! Start-pose gate
//!
//! Both arms raised: elbow straight and arm at shoulder height on each side,
//! checked against the looser start tolerance. Any low-confidence landmark
//! or any angle out of range fails the whole check.

use crate::config::ScoringConfig;
use crate::core::angle::angle_at;
use crate::types::{Landmark, Side, Skeleton};

/// Landmarks that must be visible before the gate looks at angles
pub const START_POSE_LANDMARKS: [Landmark; 8] = [
    Landmark::LeftShoulder,
    Landmark::RightShoulder,
    Landmark::LeftElbow,
    Landmark::RightElbow,
    Landmark::LeftWrist,
    Landmark::RightWrist,
    Landmark::LeftHip,
    Landmark::RightHip,
];

/// Decides whether a frame shows the start pose
#[derive(Debug, Clone)]
pub struct PoseGate {
    config: ScoringConfig,
}

impl PoseGate {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// True only when both arms match the start pose
    pub fn is_start_pose(&self, skeleton: &Skeleton) -> bool {
        if !skeleton.all_visible(&START_POSE_LANDMARKS, self.config.visibility_threshold) {
            return false;
        }
        self.side_matches(skeleton, Side::Left) && self.side_matches(skeleton, Side::Right)
    }

    fn side_matches(&self, skeleton: &Skeleton, side: Side) -> bool {
        let (elbow, shoulder) = arm_angles(skeleton, side);
        let targets = &self.config.targets;
        let tolerance = self.config.start_tolerance;

        (elbow - targets.elbow).abs() <= tolerance
            && (shoulder - targets.shoulder).abs() <= tolerance
    }
}

/// (elbow, shoulder) angles for one arm
///
/// Elbow: shoulder-elbow-wrist. Shoulder: hip-shoulder-elbow.
pub fn arm_angles(skeleton: &Skeleton, side: Side) -> (f64, f64) {
    let shoulder = skeleton.get(Landmark::shoulder(side));
    let elbow = skeleton.get(Landmark::elbow(side));
    let wrist = skeleton.get(Landmark::wrist(side));
    let hip = skeleton.get(Landmark::hip(side));

    (angle_at(shoulder, elbow, wrist), angle_at(hip, shoulder, elbow))
}
