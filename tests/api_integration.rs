//! Integration tests for the detector/display bridge
//!
//! Tests API endpoints against a live session task

use posematch::config::SessionConfig;
use posematch::core::{create_router, spawn_session};
use posematch::types::{Landmark, Phase, Point, Skeleton};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use serde_json::Value;
use std::time::Duration;

fn t_pose() -> Skeleton {
    Skeleton::hidden()
        .with(Landmark::LeftShoulder, Point::new(0.6, 0.3, 0.9))
        .with(Landmark::LeftElbow, Point::new(0.75, 0.3, 0.9))
        .with(Landmark::LeftWrist, Point::new(0.9, 0.3, 0.9))
        .with(Landmark::LeftHip, Point::new(0.6, 0.6, 0.9))
        .with(Landmark::RightShoulder, Point::new(0.4, 0.3, 0.9))
        .with(Landmark::RightElbow, Point::new(0.25, 0.3, 0.9))
        .with(Landmark::RightWrist, Point::new(0.1, 0.3, 0.9))
        .with(Landmark::RightHip, Point::new(0.4, 0.6, 0.9))
}

fn create_test_router() -> axum::Router {
    create_router(spawn_session(SessionConfig::default()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_frame(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/frame")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["phase"], "IDLE");
}

#[tokio::test]
async fn test_connections_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/connections").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let pairs = json.as_array().unwrap();
    assert_eq!(pairs.len(), 35);
    assert!(pairs.iter().any(|p| p[0] == "LEFT_SHOULDER" && p[1] == "LEFT_ELBOW"));
}

#[tokio::test]
async fn test_initial_status() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["phase"], "IDLE");
    assert_eq!(json["challenge_index"], 0);
    assert_eq!(json["challenge_count"], 3);
    assert_eq!(json["challenge_name"], "Left Arm Raise");
    assert_eq!(json["finished"], false);
}

#[tokio::test]
async fn test_report_not_found_before_finish() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/report").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_no_detection_frame() {
    let app = create_test_router();

    let response = app.oneshot(post_frame("null".to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["accepted"], true);
}

#[tokio::test]
async fn test_post_frame_with_wrong_landmark_count() {
    let app = create_test_router();

    let response = app
        .oneshot(post_frame(r#"{"landmarks": [{"x": 0.5, "y": 0.5, "visibility": 1.0}]}"#.to_string()))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_start_pose_frame_moves_session() {
    let state = spawn_session(SessionConfig::default());
    let app = create_router(state.clone());

    let body = serde_json::to_string(&t_pose()).unwrap();
    let response = app.oneshot(post_frame(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let mut phase = Phase::Idle;
    for _ in 0..100 {
        phase = state.status_rx.borrow().phase;
        if phase != Phase::Idle {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(phase, Phase::Preparation);
}
