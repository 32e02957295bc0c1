//! Score evaluator: converts a skeleton into a 0-100 match score
//!
//! Every sub-score decays linearly from 100 at zero deviation to 0 at the
//! tolerance boundary and stays 0 beyond it. The challenge score is the
//! unweighted mean of its sub-scores, rounded to one decimal.

use crate::config::ScoringConfig;
use crate::core::angle::{angle_at, tilt_from_vertical};
use crate::core::gate::arm_angles;
use crate::types::{
    Challenge, Landmark, ScoreBreakdown, ScoreReason, Side, Skeleton, SubScore, TargetType,
};

/// Landmarks the leg balance rule needs
pub const LEG_BALANCE_LANDMARKS: [Landmark; 4] = [
    Landmark::RightKnee,
    Landmark::RightAnkle,
    Landmark::RightHip,
    Landmark::LeftHip,
];

/// Per-challenge-type scoring rules
#[derive(Debug, Clone)]
pub struct ScoreEvaluator {
    config: ScoringConfig,
}

impl ScoreEvaluator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Rounded score only
    pub fn score(&self, challenge: &Challenge, skeleton: Option<&Skeleton>) -> f64 {
        self.evaluate(challenge, skeleton).score
    }

    /// Score with sub-scores and the reason for the outcome
    pub fn evaluate(&self, challenge: &Challenge, skeleton: Option<&Skeleton>) -> ScoreBreakdown {
        let Some(skeleton) = skeleton else {
            return ScoreBreakdown::zero(ScoreReason::S003_NO_SKELETON);
        };
        if challenge.eval_joints.is_empty() {
            return ScoreBreakdown::zero(ScoreReason::S004_CONFIG_ERROR);
        }

        match challenge.target_type {
            TargetType::Arm => match challenge.arm_side() {
                Some(side) => self.evaluate_arm(skeleton, side),
                None => ScoreBreakdown::zero(ScoreReason::S004_CONFIG_ERROR),
            },
            TargetType::LegBalance => self.evaluate_leg_balance(skeleton),
            TargetType::Unsupported => ScoreBreakdown::zero(ScoreReason::S004_CONFIG_ERROR),
        }
    }

    fn evaluate_arm(&self, skeleton: &Skeleton, side: Side) -> ScoreBreakdown {
        let required = [
            Landmark::shoulder(side),
            Landmark::elbow(side),
            Landmark::wrist(side),
            Landmark::hip(side),
        ];
        if !skeleton.all_visible(&required, self.config.visibility_threshold) {
            return ScoreBreakdown::zero(ScoreReason::S002_LOW_CONFIDENCE);
        }

        let targets = &self.config.targets;
        let tolerances = &self.config.tolerances;
        let (elbow, shoulder) = arm_angles(skeleton, side);

        ScoreBreakdown::from_parts(vec![
            SubScore::new(
                "elbow",
                elbow,
                targets.elbow,
                linear_score(elbow, targets.elbow, tolerances.elbow),
            ),
            SubScore::new(
                "shoulder",
                shoulder,
                targets.shoulder,
                linear_score(shoulder, targets.shoulder, tolerances.shoulder),
            ),
        ])
    }

    fn evaluate_leg_balance(&self, skeleton: &Skeleton) -> ScoreBreakdown {
        if !skeleton.all_visible(&LEG_BALANCE_LANDMARKS, self.config.visibility_threshold) {
            return ScoreBreakdown::zero(ScoreReason::S002_LOW_CONFIDENCE);
        }

        let targets = &self.config.targets;
        let tolerances = &self.config.tolerances;
        let hip = skeleton.get(Landmark::RightHip);
        let knee = skeleton.get(Landmark::RightKnee);
        let ankle = skeleton.get(Landmark::RightAnkle);
        let left_hip = skeleton.get(Landmark::LeftHip);

        let knee_angle = angle_at(hip, knee, ankle);
        // A collapsed thigh has no direction; it must not read as upright
        let (tilt, tilt_score) = match tilt_from_vertical(hip, knee) {
            Some(tilt) => (tilt, linear_score(tilt, targets.tilt, tolerances.tilt)),
            None => (0.0, 0.0),
        };
        let hip_diff_px = (left_hip.y - hip.y).abs() * self.config.surface.height as f64;

        ScoreBreakdown::from_parts(vec![
            SubScore::new(
                "knee_straightness",
                knee_angle,
                targets.knee_straight,
                linear_score(knee_angle, targets.knee_straight, tolerances.knee_straight),
            ),
            SubScore::new(
                "trunk_verticality",
                tilt,
                targets.tilt,
                tilt_score,
            ),
            SubScore::new(
                "hip_level",
                hip_diff_px,
                0.0,
                hip_level_score(left_hip.y, hip.y, self.config.surface.height, self.config.hip_level_max_px),
            ),
        ])
    }
}

/// 100 at the target, 0 at `tolerance` away or further
pub fn linear_score(measured: f64, target: f64, tolerance: f64) -> f64 {
    let deviation = (measured - target).abs();
    if tolerance <= 0.0 {
        return if deviation == 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 * (1.0 - deviation / tolerance)).clamp(0.0, 100.0)
}

/// Levelness of two normalized hip heights on a surface `height` pixels tall
pub fn hip_level_score(left_y: f64, right_y: f64, height: u32, max_px: f64) -> f64 {
    let diff_px = (left_y - right_y).abs() * height as f64;
    linear_score(diff_px, 0.0, max_px)
}
