//! Rendering sinks
//!
//! The display is an external collaborator: it receives one [`RenderFrame`]
//! per frame or tick plus the session events, and is otherwise opaque.

use colored::Colorize;

use crate::core::markup;
use crate::types::{RenderFrame, ScoreTier, SessionEvent};

/// Receives drawing instructions from the session runner
pub trait RenderSink {
    fn draw(&mut self, frame: &RenderFrame);

    fn event(&mut self, _event: &SessionEvent) {}
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _frame: &RenderFrame) {}
}

/// Collects frames and events in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<RenderFrame>,
    pub events: Vec<SessionEvent>,
}

impl RenderSink for RecordingSink {
    fn draw(&mut self, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }

    fn event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

/// Status line on stdout, printed only when it changes
#[derive(Debug, Default)]
pub struct TerminalSink {
    no_color: bool,
    json: bool,
    last_line: Option<String>,
}

impl TerminalSink {
    pub fn new(no_color: bool, json: bool) -> Self {
        Self { no_color, json, last_line: None }
    }

    /// One status line for a frame
    pub fn format(&self, frame: &RenderFrame) -> String {
        if self.no_color {
            return frame.to_parseable_string();
        }

        let score = format!("{:.1}%", frame.score);
        let score = match frame.score_tier {
            ScoreTier::High => score.green().bold(),
            ScoreTier::Mid => score.yellow().bold(),
            ScoreTier::Low => score.red(),
        };
        let countdown = frame
            .countdown
            .map(|c| format!(" [{}]", c).cyan().bold().to_string())
            .unwrap_or_default();

        format!(
            "{}{} {}{} ({}/{}) {} | {}{}",
            frame.phase.color_code(),
            frame.phase.emoji(),
            frame.phase,
            crate::types::Phase::color_reset(),
            frame.challenge_index + 1,
            frame.challenge_count,
            frame.challenge_name,
            score,
            countdown
        )
    }
}

impl RenderSink for TerminalSink {
    fn draw(&mut self, frame: &RenderFrame) {
        if self.json {
            return;
        }
        let line = self.format(frame);
        if self.last_line.as_deref() != Some(line.as_str()) {
            println!("{}", line);
            self.last_line = Some(line);
        }
    }

    fn event(&mut self, event: &SessionEvent) {
        if self.json {
            if let Ok(json) = serde_json::to_string(event) {
                println!("{}", json);
            }
            return;
        }
        match event {
            SessionEvent::Finalized { name, score, message, .. } => {
                let text = format!("  ✓ {} finalized at {:.1} - {}", name, score, message);
                if self.no_color {
                    println!("{}", text);
                } else {
                    println!("{}", text.magenta());
                }
            }
            SessionEvent::PhaseChanged { to: crate::types::Phase::Idle, .. } => {
                self.last_line = None;
            }
            _ => {}
        }
    }
}

/// Print a guide message the way the terminal sink does
pub fn guide_text(message: &str, no_color: bool) -> String {
    if no_color {
        markup::to_plain(message)
    } else {
        markup::to_terminal(message)
    }
}
