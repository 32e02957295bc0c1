//! Events emitted by session transitions

use serde::{Deserialize, Serialize};
use crate::types::{Phase, SessionReport};

/// Observable outcome of one transition step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    PhaseChanged { from: Phase, to: Phase },
    /// Countdown seconds left (0 right before the hold)
    CountdownTick { remaining: u32 },
    /// Hold seconds left
    HoldTick { remaining: u32 },
    /// Displayed score updated from a live frame
    LiveScore { score: f64 },
    /// A challenge's final score was committed
    Finalized {
        index: usize,
        name: String,
        score: f64,
        message: String,
    },
    Finished { report: SessionReport },
}
