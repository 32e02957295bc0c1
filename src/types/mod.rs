//! Core types for PoseMatch

mod point;
mod landmark;
mod skeleton;
mod challenge;
mod state;
mod reason;
mod score;
mod output;
mod report;
mod event;

pub use point::Point;
pub use landmark::{Landmark, Side, POSE_CONNECTIONS};
pub use skeleton::Skeleton;
pub use challenge::{Challenge, TargetType};
pub use state::Phase;
pub use reason::ScoreReason;
pub use score::{SubScore, ScoreBreakdown, ScoreTier, round1};
pub use output::{RenderFrame, OverlayKind, CountdownIndicator};
pub use report::{SessionReport, ReportEntry};
pub use event::SessionEvent;
