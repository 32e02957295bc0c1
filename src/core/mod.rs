//! Core modules for PoseMatch

pub mod angle;
pub mod gate;
pub mod scorer;
pub mod timer;
pub mod aggregator;
pub mod session;
pub mod markup;
pub mod render;
pub mod runner;
pub mod api;

pub use angle::{angle_at, tilt_from_vertical};
pub use gate::PoseGate;
pub use scorer::{ScoreEvaluator, linear_score, hip_level_score};
pub use timer::{PhaseTimings, PhaseTimer, Scheduler};
pub use aggregator::ResultAggregator;
pub use session::{ChallengeSession, SessionState, SessionRules, Step};
pub use render::{RenderSink, TerminalSink, RecordingSink, NullSink, guide_text};
pub use runner::{SessionRunner, FrameInput, parse_frames, replay_frames};
pub use api::{create_router, run_server, spawn_session};
