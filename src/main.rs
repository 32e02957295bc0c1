//! PoseMatch CLI
//!
//! Usage:
//!   posematch --replay frames.jsonl           # Replay recorded detector frames
//!   posematch --replay frames.jsonl --json    # JSON event stream + report
//!   posematch --serve                         # Detector/display bridge
//!   posematch --print-config                  # Dump the effective config

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use posematch::config::SessionConfig;
use posematch::core::{guide_text, parse_frames, replay_frames, run_server, RenderSink, SessionRunner, TerminalSink};
use posematch::types::{Challenge, Phase, RenderFrame, SessionEvent};
use posematch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "posematch",
    version = VERSION,
    about = "PoseMatch - Match on-screen poses and get scored",
    long_about = "PoseMatch runs a sequence of pose challenges against a stream of\n\
                  body-keypoint frames and scores how closely each pose is held.\n\n\
                  Modes:\n  \
                  --replay FILE  Replay JSON-lines detector frames\n  \
                  --serve        Detector/display bridge (HTTP + WebSocket)\n\n\
                  Phases:\n  \
                  IDLE        - Waiting for the T-pose start signal\n  \
                  PREPARATION - Settling in\n  \
                  COUNTDOWN   - 3, 2, 1\n  \
                  HOLD        - Hold the pose, live score shown\n  \
                  FIXED       - Next frame is frozen and scored\n  \
                  ADVANCE     - Moving to the next challenge\n  \
                  FINISHED    - Report available"
)]
struct Args {
    /// JSON-lines file of detector frames (skeleton or null per line)
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Replay frame rate
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Run as detector/display bridge server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Session config file (JSON); built-in challenges if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.serve {
        print_header("Bridge", args.no_color);
        run_server(&args.addr, config)
            .await
            .with_context(|| format!("serving on {}", args.addr))?;
    } else if let Some(path) = &args.replay {
        run_replay(path, config, &args).await?;
    } else {
        print_sequence(&config, args.no_color);
    }
    Ok(())
}

/// Replay a recorded frame stream through one session
async fn run_replay(path: &Path, config: SessionConfig, args: &Args) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading frames {}", path.display()))?;
    let frames = parse_frames(&content)?;
    let interval = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));

    if !args.json {
        print_header("Replay", args.no_color);
        println!("{} frames at {} fps", frames.len(), args.fps);
        println!();
    }

    let (tx, rx) = mpsc::channel(args.fps.max(1) as usize);
    tokio::spawn(replay_frames(frames, interval, tx));

    let sink = CliSink::new(args.no_color, args.json);
    let mut runner = SessionRunner::new(&config, sink);
    let report = runner.run(rx).await.context("replay ended early")?;

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!();
        if args.no_color {
            println!("{}", report.to_parseable_string());
        } else {
            println!("{}", report.to_terminal_string());
        }
    }
    Ok(())
}

/// Terminal sink that also prints each challenge's guide when it comes up
struct CliSink {
    inner: TerminalSink,
    no_color: bool,
    json: bool,
    guided: Option<usize>,
}

impl CliSink {
    fn new(no_color: bool, json: bool) -> Self {
        Self {
            inner: TerminalSink::new(no_color, json),
            no_color,
            json,
            guided: None,
        }
    }
}

impl RenderSink for CliSink {
    fn draw(&mut self, frame: &RenderFrame) {
        if !self.json && frame.phase == Phase::Idle && self.guided != Some(frame.challenge_index) {
            self.guided = Some(frame.challenge_index);
            println!();
            println!("── {} ──", frame.challenge_name);
            println!("{}", guide_text(&frame.guide_message, self.no_color));
        }
        self.inner.draw(frame);
    }

    fn event(&mut self, event: &SessionEvent) {
        self.inner.event(event);
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  PoseMatch v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("\x1b[1m╔══════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║  PoseMatch v{} - {:<18}   ║\x1b[0m", VERSION, mode);
        println!("\x1b[1m╚══════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

/// No mode given: show what a session would run
fn print_sequence(config: &SessionConfig, no_color: bool) {
    print_header("Challenges", no_color);
    for (i, challenge) in config.challenges.iter().enumerate() {
        println!("{}", sequence_line(i, challenge));
        for line in guide_text(&challenge.guide_message, no_color).lines() {
            println!("   {}", line);
        }
    }
    println!();
    println!("Run with --replay FILE or --serve to start a session.");
}

/// Numbered heading for one challenge, using the config's type names
fn sequence_line(index: usize, challenge: &Challenge) -> String {
    format!("{}. {} ({})", index + 1, challenge.name, challenge.target_type)
}
