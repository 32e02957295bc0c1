//! Drawing instructions for the rendering sink

use serde::{Deserialize, Serialize};
use crate::types::{Phase, ScoreTier, Skeleton};

/// Which skeleton the overlay is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayKind {
    /// Current detector frame
    Live,
    /// Snapshot taken at finalization
    Frozen,
}

impl OverlayKind {
    /// (connector, landmark) color pair
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            OverlayKind::Live => ("#00FF00", "#FF0000"),
            OverlayKind::Frozen => ("#FFD700", "#FFFFFF"),
        }
    }
}

/// Countdown display next to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountdownIndicator {
    /// Seconds left before the hold starts
    Seconds(u32),
    /// Hold in progress
    Go,
}

impl std::fmt::Display for CountdownIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountdownIndicator::Seconds(n) => write!(f, "{}", n),
            CountdownIndicator::Go => write!(f, "GO"),
        }
    }
}

/// Everything the display needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: Phase,
    pub challenge_index: usize,
    pub challenge_count: usize,
    pub challenge_name: String,
    /// Skeleton to draw, `None` when nothing is detected
    pub skeleton: Option<Skeleton>,
    pub overlay: OverlayKind,
    pub connector_color: String,
    pub landmark_color: String,
    /// Guide text, may contain `**emphasis**` and `<br>` markup
    pub guide_message: String,
    pub score: f64,
    pub score_tier: ScoreTier,
    /// Display color of `score_tier`
    pub score_color: String,
    pub countdown: Option<CountdownIndicator>,
    /// Hold ticks left, only while holding
    pub hold_remaining: Option<u32>,
}

impl RenderFrame {
    /// Format for parseable output (no colors, no markup)
    pub fn to_parseable_string(&self) -> String {
        let countdown = self
            .countdown
            .map(|c| format!(" | countdown={}", c))
            .unwrap_or_default();
        format!(
            "challenge={}/{} | phase={} | score={:.1} | tier={:?}{}",
            self.challenge_index + 1,
            self.challenge_count,
            self.phase,
            self.score,
            self.score_tier,
            countdown
        )
    }
}
