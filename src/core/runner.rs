//! Async session runner
//!
//! One task multiplexes the detector's frame stream with the session's
//! armed timer. Each frame or firing is applied as one atomic transition
//! before the next is polled, so no locking is needed.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::core::render::RenderSink;
use crate::core::session::ChallengeSession;
use crate::error::{FrameError, RunnerError};
use crate::types::{SessionEvent, SessionReport, Skeleton};

/// One detector callback: a skeleton, or `None` when nobody was detected
pub type FrameInput = Option<Skeleton>;

/// Drives a [`ChallengeSession`] from a frame channel and the clock
pub struct SessionRunner<S: RenderSink> {
    session: ChallengeSession,
    sink: S,
    last_frame: FrameInput,
}

impl<S: RenderSink> SessionRunner<S> {
    pub fn new(config: &SessionConfig, sink: S) -> Self {
        Self {
            session: ChallengeSession::new(config),
            sink,
            last_frame: None,
        }
    }

    /// Run until the last challenge finishes
    ///
    /// If the frame channel closes early, pending timers still run out; the
    /// session then fails with [`RunnerError::FramesClosed`] unless it finished.
    pub async fn run(&mut self, mut frames: mpsc::Receiver<FrameInput>) -> Result<SessionReport, RunnerError> {
        let started = Instant::now();
        let mut frames_open = true;
        info!(challenges = self.session.state().challenges().len(), "session started");

        loop {
            if let Some(report) = self.session.report() {
                return Ok(report.clone());
            }

            let deadline = self.session.next_deadline().map(|d| started + d);
            if !frames_open && deadline.is_none() {
                warn!(phase = %self.session.phase(), "frame source closed, session stalled");
                return Err(RunnerError::FramesClosed);
            }

            let events = tokio::select! {
                biased;

                _ = wait_until(deadline) => {
                    let events = self.session.advance_to(started.elapsed());
                    self.sink.draw(&self.session.render(self.last_frame.as_ref()));
                    events
                }

                frame = frames.recv(), if frames_open => match frame {
                    Some(frame) => {
                        let events = self.session.on_frame(frame.as_ref(), started.elapsed());
                        self.sink.draw(&self.session.render(frame.as_ref()));
                        self.last_frame = frame;
                        events
                    }
                    None => {
                        frames_open = false;
                        Vec::new()
                    }
                },
            };

            for event in &events {
                log_event(event);
                self.sink.event(event);
            }
        }
    }

    pub fn session(&self) -> &ChallengeSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::PhaseChanged { from, to } => info!(%from, %to, "phase changed"),
        SessionEvent::CountdownTick { remaining } => debug!(remaining, "countdown"),
        SessionEvent::HoldTick { remaining } => debug!(remaining, "hold"),
        SessionEvent::LiveScore { score } => debug!(score, "live score"),
        SessionEvent::Finalized { index, name, score, .. } => {
            info!(index, name = %name, score, "challenge finalized")
        }
        SessionEvent::Finished { report } => {
            info!(mean = report.mean, success = report.success, digest = %report.digest, "session finished")
        }
    }
}

/// Decode a JSON-lines replay: one skeleton or `null` per line
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_frames(content: &str) -> Result<Vec<FrameInput>, FrameError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<FrameInput>(line)
                .map_err(|source| FrameError::Parse { line: i + 1, source })
        })
        .collect()
}

/// Feed `frames` into a channel, one every `interval`
pub async fn replay_frames(frames: Vec<FrameInput>, interval: Duration, tx: mpsc::Sender<FrameInput>) {
    for frame in frames {
        if tx.send(frame).await.is_err() {
            break;
        }
        tokio::time::sleep(interval).await;
    }
}
