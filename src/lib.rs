//! PoseMatch: pose-matching challenge engine
//!
//! Keypoint frame → PoseGate / ScoreEvaluator → ChallengeSession → report

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// LANDMARK CONFIDENCE
// =============================================================================

/// Minimum visibility for a landmark to be used (inclusive)
pub const VISIBILITY_THRESHOLD: f64 = 0.7;

/// Number of landmarks in one skeleton (MediaPipe Pose layout)
pub const LANDMARK_COUNT: usize = 33;

// =============================================================================
// TARGET ANGLES (degrees)
// =============================================================================

/// Straight arm at the elbow
pub const TARGET_ELBOW: f64 = 180.0;

/// Arm raised to shoulder height (hip-shoulder-elbow)
pub const TARGET_SHOULDER: f64 = 90.0;

/// Straight standing leg (hip-knee-ankle)
pub const TARGET_KNEE_STRAIGHT: f64 = 180.0;

/// Thigh segment deviation from vertical
pub const TARGET_TILT: f64 = 0.0;

// =============================================================================
// TOLERANCES (degrees)
// =============================================================================

pub const TOLERANCE_ELBOW: f64 = 30.0;
pub const TOLERANCE_SHOULDER: f64 = 30.0;
pub const TOLERANCE_KNEE_STRAIGHT: f64 = 20.0;
pub const TOLERANCE_TILT: f64 = 15.0;

/// Looser tolerance, used only by the start-pose gate
pub const START_POSE_TOLERANCE: f64 = 45.0;

/// Hip height difference (pixels) at which levelness scores 0
pub const HIP_LEVEL_MAX_PX: f64 = 20.0;

// =============================================================================
// RENDERING SURFACE
// =============================================================================

pub const DEFAULT_SURFACE_HEIGHT: u32 = 480;

// =============================================================================
// PHASE TIMINGS (milliseconds)
// =============================================================================

/// Settle delay after the start pose is detected
pub const PREPARATION_MS: u64 = 1500;

/// Countdown / hold tick interval (1 Hz)
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Countdown length in ticks
pub const COUNTDOWN_TICKS: u32 = 3;

/// Live-scored hold length in ticks
pub const HOLD_TICKS: u32 = 5;

/// Delay between finalization and the next challenge
pub const ADVANCE_MS: u64 = 1000;

// =============================================================================
// MESSAGE TIERS
// =============================================================================

/// Score above which a challenge is celebrated (and the session succeeds)
pub const SCORE_TIER_HIGH: f64 = 90.0;

/// Score above which a challenge counts as a near miss
pub const SCORE_TIER_MID: f64 = 70.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
