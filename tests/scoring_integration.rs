//! Integration tests for scoring
//!
//! Tests the path: skeleton → PoseGate / ScoreEvaluator → score

use pretty_assertions::assert_eq;
use posematch::config::{ScoringConfig, SessionConfig};
use posematch::core::{angle_at, hip_level_score, linear_score, PoseGate, ScoreEvaluator};
use posematch::types::{Landmark, Point, ScoreReason, Skeleton};

fn t_pose(visibility: f64) -> Skeleton {
    Skeleton::hidden()
        .with(Landmark::LeftShoulder, Point::new(0.6, 0.3, visibility))
        .with(Landmark::LeftElbow, Point::new(0.75, 0.3, visibility))
        .with(Landmark::LeftWrist, Point::new(0.9, 0.3, visibility))
        .with(Landmark::LeftHip, Point::new(0.6, 0.6, visibility))
        .with(Landmark::RightShoulder, Point::new(0.4, 0.3, visibility))
        .with(Landmark::RightElbow, Point::new(0.25, 0.3, visibility))
        .with(Landmark::RightWrist, Point::new(0.1, 0.3, visibility))
        .with(Landmark::RightHip, Point::new(0.4, 0.6, visibility))
}

/// T-pose standing straight on the right leg
fn balanced() -> Skeleton {
    t_pose(0.9)
        .with(Landmark::RightKnee, Point::new(0.4, 0.75, 0.9))
        .with(Landmark::RightAnkle, Point::new(0.4, 0.9, 0.9))
}

#[test]
fn test_angle_is_symmetric() {
    let a = Point::new(0.1, 0.7, 1.0);
    let m = Point::new(0.4, 0.4, 1.0);
    let b = Point::new(0.9, 0.5, 1.0);
    assert!((angle_at(&a, &m, &b) - angle_at(&b, &m, &a)).abs() < 1e-9);
}

#[test]
fn test_angle_ignores_depth() {
    let a = Point::with_depth(0.0, 0.0, -3.0, 1.0);
    let m = Point::with_depth(1.0, 0.0, 5.0, 1.0);
    let b = Point::with_depth(1.0, 1.0, 0.2, 1.0);
    assert!((angle_at(&a, &m, &b) - 90.0).abs() < 1e-9);
}

#[test]
fn test_gate_visibility_boundary() {
    let gate = PoseGate::new(ScoringConfig::default());
    assert!(gate.is_start_pose(&t_pose(0.7)));
    assert!(!gate.is_start_pose(&t_pose(0.69)));
}

#[test]
fn test_gate_needs_both_arms() {
    let gate = PoseGate::new(ScoringConfig::default());
    // Right arm hanging straight down
    let one_arm = t_pose(0.9)
        .with(Landmark::RightElbow, Point::new(0.4, 0.45, 0.9))
        .with(Landmark::RightWrist, Point::new(0.4, 0.6, 0.9));
    assert!(!gate.is_start_pose(&one_arm));
}

#[test]
fn test_default_challenges_score_perfect_pose() {
    let config = SessionConfig::default();
    let evaluator = ScoreEvaluator::new(config.scoring);
    let skeleton = balanced();

    let scores: Vec<f64> = config
        .challenges
        .iter()
        .map(|c| evaluator.score(c, Some(&skeleton)))
        .collect();
    assert_eq!(scores, vec![100.0, 100.0, 100.0]);
}

#[test]
fn test_missing_skeleton_scores_zero() {
    let config = SessionConfig::default();
    let evaluator = ScoreEvaluator::new(config.scoring);
    let breakdown = evaluator.evaluate(&config.challenges[0], None);
    assert_eq!(breakdown.score, 0.0);
    assert_eq!(breakdown.reason, ScoreReason::S003_NO_SKELETON);
}

#[test]
fn test_leg_balance_low_confidence_scores_zero() {
    let config = SessionConfig::default();
    let evaluator = ScoreEvaluator::new(config.scoring);
    let skeleton = balanced().with(Landmark::RightAnkle, Point::new(0.4, 0.9, 0.5));
    let breakdown = evaluator.evaluate(&config.challenges[2], Some(&skeleton));
    assert_eq!(breakdown.score, 0.0);
    assert_eq!(breakdown.reason, ScoreReason::S002_LOW_CONFIDENCE);
}

#[test]
fn test_hip_levelness_in_pixels() {
    let level = 0.5;
    assert_eq!(hip_level_score(level, level, 480, 20.0), 100.0);

    let ten_px = hip_level_score(level, level + 10.0 / 480.0, 480, 20.0);
    assert!((ten_px - 50.0).abs() < 1e-6, "got {}", ten_px);

    let twenty_px = hip_level_score(level, level + 20.0 / 480.0, 480, 20.0);
    assert!(twenty_px < 1e-6, "got {}", twenty_px);

    assert_eq!(hip_level_score(level, level + 0.5, 480, 20.0), 0.0);
}

#[test]
fn test_linear_score_is_clamped() {
    assert_eq!(linear_score(180.0, 180.0, 30.0), 100.0);
    assert_eq!(linear_score(165.0, 180.0, 30.0), 50.0);
    assert_eq!(linear_score(195.0, 180.0, 30.0), 50.0);
    assert_eq!(linear_score(90.0, 180.0, 30.0), 0.0);
}
