//! Challenge definitions

use serde::{Deserialize, Serialize};
use crate::types::{Landmark, Side};

/// Scoring rule a challenge is evaluated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    /// Straight arm raised to shoulder height, one side
    Arm,
    /// Right-leg stance with level hips
    LegBalance,
    /// Any type this build does not know; always scores 0
    #[serde(other)]
    Unsupported,
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetType::Arm => "ARM",
            TargetType::LegBalance => "LEG_BALANCE",
            TargetType::Unsupported => "UNSUPPORTED",
        };
        write!(f, "{}", name)
    }
}

/// One target pose in the session's fixed sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub name: String,
    pub target_type: TargetType,
    /// Joints the rule looks at; ARM derives its side from these
    #[serde(default)]
    pub eval_joints: Vec<Landmark>,
    /// Instruction shown while the challenge is active (supports markup)
    pub guide_message: String,
    /// Final score, written once when the challenge finalizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Challenge {
    /// Create an unscored challenge
    pub fn new(
        name: impl Into<String>,
        target_type: TargetType,
        eval_joints: Vec<Landmark>,
        guide_message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_type,
            eval_joints,
            guide_message: guide_message.into(),
            score: None,
        }
    }

    /// Arm side from the first sided evaluation joint
    pub fn arm_side(&self) -> Option<Side> {
        self.eval_joints.iter().find_map(|lm| lm.side())
    }

    /// Has this challenge been finalized?
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}
