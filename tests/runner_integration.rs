//! Integration tests for the async runner
//!
//! Tests the full path: frame channel + tokio clock → SessionRunner → sink

use pretty_assertions::assert_eq;
use posematch::config::SessionConfig;
use posematch::core::{replay_frames, FrameInput, RecordingSink, SessionRunner};
use posematch::error::RunnerError;
use posematch::types::{Landmark, OverlayKind, Phase, Point, SessionEvent, Skeleton};
use std::time::Duration;
use tokio::sync::mpsc;

fn perfect_pose() -> Skeleton {
    Skeleton::hidden()
        .with(Landmark::LeftShoulder, Point::new(0.6, 0.3, 0.9))
        .with(Landmark::LeftElbow, Point::new(0.75, 0.3, 0.9))
        .with(Landmark::LeftWrist, Point::new(0.9, 0.3, 0.9))
        .with(Landmark::LeftHip, Point::new(0.6, 0.6, 0.9))
        .with(Landmark::RightShoulder, Point::new(0.4, 0.3, 0.9))
        .with(Landmark::RightElbow, Point::new(0.25, 0.3, 0.9))
        .with(Landmark::RightWrist, Point::new(0.1, 0.3, 0.9))
        .with(Landmark::RightHip, Point::new(0.4, 0.6, 0.9))
        .with(Landmark::RightKnee, Point::new(0.4, 0.75, 0.9))
        .with(Landmark::RightAnkle, Point::new(0.4, 0.9, 0.9))
}

fn start_replay(count: usize) -> mpsc::Receiver<FrameInput> {
    let frames = vec![Some(perfect_pose()); count];
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(replay_frames(frames, Duration::from_millis(100), tx));
    rx
}

#[tokio::test(start_paused = true)]
async fn test_full_session_over_channel() {
    let mut runner = SessionRunner::new(&SessionConfig::default(), RecordingSink::default());
    let report = runner.run(start_replay(400)).await.unwrap();

    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.mean, 100.0);
    assert!(report.success);

    let sink = runner.into_sink();
    let finalized: Vec<usize> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Finalized { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(finalized, vec![0, 1, 2]);
    assert!(matches!(sink.events.last(), Some(SessionEvent::Finished { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_timers_fire_without_frames() {
    // Only two seconds of frames: the clock alone must carry the session to FIXED
    let mut runner = SessionRunner::new(&SessionConfig::default(), RecordingSink::default());
    let result = runner.run(start_replay(20)).await;

    assert!(matches!(result, Err(RunnerError::FramesClosed)));
    assert_eq!(runner.session().phase(), Phase::Fixed);

    let holds = runner
        .sink()
        .events
        .iter()
        .filter(|e| matches!(e, SessionEvent::HoldTick { .. }))
        .count();
    assert_eq!(holds, 5);
}

#[tokio::test(start_paused = true)]
async fn test_frozen_overlay_is_drawn_after_finalization() {
    let mut runner = SessionRunner::new(&SessionConfig::default(), RecordingSink::default());
    runner.run(start_replay(400)).await.unwrap();

    let sink = runner.into_sink();
    let first_advance = sink
        .frames
        .iter()
        .find(|f| f.phase == Phase::Advance)
        .unwrap();
    assert_eq!(first_advance.overlay, OverlayKind::Frozen);
    assert_eq!(first_advance.challenge_index, 0);
    assert_eq!(first_advance.score, 100.0);
}
