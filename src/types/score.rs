//! Score structures

use serde::{Deserialize, Serialize};
use crate::types::ScoreReason;
use crate::{SCORE_TIER_HIGH, SCORE_TIER_MID};

/// One component of a challenge score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    /// e.g. "elbow", "knee_straightness", "hip_level"
    pub name: String,
    /// Measured value (degrees, or pixels for hip level)
    pub measured: f64,
    pub target: f64,
    /// 0-100
    pub score: f64,
}

impl SubScore {
    pub fn new(name: &str, measured: f64, target: f64, score: f64) -> Self {
        Self { name: name.to_string(), measured, target, score }
    }
}

/// Full result of evaluating one skeleton against one challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-100, rounded to one decimal
    pub score: f64,
    pub parts: Vec<SubScore>,
    pub reason: ScoreReason,
}

impl ScoreBreakdown {
    /// Zero score with the reason it could not be computed
    pub fn zero(reason: ScoreReason) -> Self {
        Self { score: 0.0, parts: Vec::new(), reason }
    }

    /// Unweighted mean of the parts, rounded
    pub fn from_parts(parts: Vec<SubScore>) -> Self {
        let mean = if parts.is_empty() {
            0.0
        } else {
            parts.iter().map(|p| p.score).sum::<f64>() / parts.len() as f64
        };
        Self {
            score: round1(mean),
            parts,
            reason: ScoreReason::S001_SCORED,
        }
    }

    /// Look up a part by name
    pub fn part(&self, name: &str) -> Option<&SubScore> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Color tier for a displayed score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreTier {
    /// > 90
    High,
    /// > 70
    Mid,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score > SCORE_TIER_HIGH {
            ScoreTier::High
        } else if score > SCORE_TIER_MID {
            ScoreTier::Mid
        } else {
            ScoreTier::Low
        }
    }

    /// CSS-style color for display sinks
    pub fn color(&self) -> &'static str {
        match self {
            ScoreTier::High => "#2ecc71",
            ScoreTier::Mid => "#f1c40f",
            ScoreTier::Low => "#e74c3c",
        }
    }

    /// Message shown when a challenge finalizes in this tier
    pub fn completion_message(&self) -> &'static str {
        match self {
            ScoreTier::High => "Perfect! You nailed it!",
            ScoreTier::Mid => "So close! Almost there!",
            ScoreTier::Low => "Challenge complete. Keep practicing!",
        }
    }
}
