//! Reason codes for score outcomes

use serde::{Deserialize, Serialize};

/// Why a score came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ScoreReason {
    /// All required landmarks visible, score computed
    S001_SCORED,
    /// A required landmark was below the visibility threshold
    S002_LOW_CONFIDENCE,
    /// No skeleton in this frame
    S003_NO_SKELETON,
    /// Challenge has an unsupported type or no usable evaluation joints
    S004_CONFIG_ERROR,
}

impl ScoreReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S001_SCORED => "S001_SCORED",
            Self::S002_LOW_CONFIDENCE => "S002_LOW_CONFIDENCE",
            Self::S003_NO_SKELETON => "S003_NO_SKELETON",
            Self::S004_CONFIG_ERROR => "S004_CONFIG_ERROR",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S001_SCORED => "Pose scored",
            Self::S002_LOW_CONFIDENCE => "Required landmark not visible",
            Self::S003_NO_SKELETON => "No pose detected",
            Self::S004_CONFIG_ERROR => "Challenge cannot be evaluated",
        }
    }
}

impl std::fmt::Display for ScoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
