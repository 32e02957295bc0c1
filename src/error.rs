//! Error types for the I/O edges of PoseMatch.
//!
//! The scoring engine and session state machine never fail: low-confidence
//! landmarks, degenerate geometry and bad challenge definitions all degrade
//! to a score of 0. Errors only exist where data enters or leaves the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading a session configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for a session config
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A session needs at least one challenge
    #[error("config defines no challenges")]
    NoChallenges,
}

/// Errors from decoding a detector frame
#[derive(Error, Debug)]
pub enum FrameError {
    /// A skeleton must carry exactly one point per landmark
    #[error("expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    /// Malformed frame payload
    #[error("invalid frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from driving a session
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The frame source went away before the last challenge finished
    #[error("frame source closed before the session finished")]
    FramesClosed,
}
