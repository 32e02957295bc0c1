//! Session configuration
//!
//! Loaded once at session start and immutable afterwards. Every field has a
//! default so a config file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::PhaseTimings;
use crate::error::ConfigError;
use crate::types::{Challenge, Landmark, TargetType};
use crate::{
    DEFAULT_SURFACE_HEIGHT, HIP_LEVEL_MAX_PX, START_POSE_TOLERANCE,
    TARGET_ELBOW, TARGET_KNEE_STRAIGHT, TARGET_SHOULDER, TARGET_TILT, TOLERANCE_ELBOW,
    TOLERANCE_KNEE_STRAIGHT, TOLERANCE_SHOULDER, TOLERANCE_TILT, VISIBILITY_THRESHOLD,
};

/// Target angle per joint role, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetAngles {
    pub elbow: f64,
    pub shoulder: f64,
    pub knee_straight: f64,
    pub tilt: f64,
}

impl Default for TargetAngles {
    fn default() -> Self {
        Self {
            elbow: TARGET_ELBOW,
            shoulder: TARGET_SHOULDER,
            knee_straight: TARGET_KNEE_STRAIGHT,
            tilt: TARGET_TILT,
        }
    }
}

/// Allowed deviation per joint role, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    pub elbow: f64,
    pub shoulder: f64,
    pub knee_straight: f64,
    pub tilt: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            elbow: TOLERANCE_ELBOW,
            shoulder: TOLERANCE_SHOULDER,
            knee_straight: TOLERANCE_KNEE_STRAIGHT,
            tilt: TOLERANCE_TILT,
        }
    }
}

/// Rendering surface; only its height feeds scoring (hip levelness in pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Surface {
    pub height: u32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

/// Constant tables handed to the gate and the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub targets: TargetAngles,
    pub tolerances: Tolerances,
    /// Tolerance for the start pose only
    pub start_tolerance: f64,
    pub visibility_threshold: f64,
    /// Hip height difference that scores 0
    pub hip_level_max_px: f64,
    pub surface: Surface,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            targets: TargetAngles::default(),
            tolerances: Tolerances::default(),
            start_tolerance: START_POSE_TOLERANCE,
            visibility_threshold: VISIBILITY_THRESHOLD,
            hip_level_max_px: HIP_LEVEL_MAX_PX,
            surface: Surface::default(),
        }
    }
}

/// Non-fatal problems found in a config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    UnsupportedType { challenge: String },
    NoEvalJoints { challenge: String },
    ArmWithoutSide { challenge: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType { challenge } => {
                write!(f, "challenge '{}' has an unsupported target type and will score 0", challenge)
            }
            Self::NoEvalJoints { challenge } => {
                write!(f, "challenge '{}' has no evaluation joints and will score 0", challenge)
            }
            Self::ArmWithoutSide { challenge } => {
                write!(f, "arm challenge '{}' names no left/right joint and will score 0", challenge)
            }
        }
    }
}

/// Full session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub challenges: Vec<Challenge>,
    pub scoring: ScoringConfig,
    pub timings: PhaseTimings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            challenges: default_challenges(),
            scoring: ScoringConfig::default(),
            timings: PhaseTimings::default(),
        }
    }
}

impl SessionConfig {
    /// Read a JSON config file, logging any warnings
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        info!(path = %path.display(), challenges = config.challenges.len(), "loaded session config");
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut config: SessionConfig = serde_json::from_str(content)?;
        for warning in config.validate()? {
            warn!("{}", warning);
        }
        // Scores are session state, never configuration
        for challenge in &mut config.challenges {
            challenge.score = None;
        }
        Ok(config)
    }

    /// Check the challenge list; only an empty list is fatal
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        if self.challenges.is_empty() {
            return Err(ConfigError::NoChallenges);
        }

        let mut warnings = Vec::new();
        for c in &self.challenges {
            let challenge = c.name.clone();
            if c.target_type == TargetType::Unsupported {
                warnings.push(ConfigWarning::UnsupportedType { challenge });
            } else if c.eval_joints.is_empty() {
                warnings.push(ConfigWarning::NoEvalJoints { challenge });
            } else if c.target_type == TargetType::Arm && c.arm_side().is_none() {
                warnings.push(ConfigWarning::ArmWithoutSide { challenge });
            }
        }
        Ok(warnings)
    }
}

/// Built-in challenge sequence
pub fn default_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new(
            "Left Arm Raise",
            TargetType::Arm,
            vec![Landmark::LeftShoulder, Landmark::LeftElbow, Landmark::LeftWrist],
            "Raise your **left arm** straight out<br>to shoulder height",
        ),
        Challenge::new(
            "Right Arm Raise",
            TargetType::Arm,
            vec![Landmark::RightShoulder, Landmark::RightElbow, Landmark::RightWrist],
            "Raise your **right arm** straight out<br>to shoulder height",
        ),
        Challenge::new(
            "Right Leg Balance",
            TargetType::LegBalance,
            vec![Landmark::RightHip, Landmark::RightKnee, Landmark::RightAnkle, Landmark::LeftHip],
            "Stand on your **right leg**<br>and keep your hips level",
        ),
    ]
}
