//! Session phase definitions

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the active challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Waiting for the start pose
    Idle,
    /// Start pose seen, letting the user settle
    Preparation,
    /// 3-2-1 countdown, no scoring
    Countdown,
    /// Live scoring window
    Hold,
    /// Hold expired, next frame is frozen and scored
    Fixed,
    /// Final score committed, waiting to move on
    Advance,
    /// Every challenge is done
    Finished,
}

impl Phase {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Phase::Idle => "\x1b[90m",        // Gray
            Phase::Preparation => "\x1b[36m", // Cyan
            Phase::Countdown => "\x1b[33m",   // Yellow
            Phase::Hold => "\x1b[32m",        // Green
            Phase::Fixed | Phase::Advance => "\x1b[35m", // Magenta
            Phase::Finished => "\x1b[1m",     // Bold
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Idle => "⏳",
            Phase::Preparation => "🧘",
            Phase::Countdown => "⏱",
            Phase::Hold => "💪",
            Phase::Fixed | Phase::Advance => "📸",
            Phase::Finished => "🏁",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "IDLE",
            Phase::Preparation => "PREPARATION",
            Phase::Countdown => "COUNTDOWN",
            Phase::Hold => "HOLD",
            Phase::Fixed => "FIXED",
            Phase::Advance => "ADVANCE",
            Phase::Finished => "FINISHED",
        };
        write!(f, "{}", name)
    }
}
