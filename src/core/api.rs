//! HTTP + WebSocket bridge for the detector and display collaborators
//!
//! Endpoints:
//! - POST /frame - Push one detector frame (skeleton JSON or `null`)
//! - GET /status - Current phase, challenge and displayed score
//! - GET /report - Session report (404 until finished)
//! - WS /ws - Live render frames
//! - GET /connections - Landmark pairs the overlay draws
//! - GET /health - Health check
//!
//! Serves exactly one local session.

use axum::{
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::core::render::RenderSink;
use crate::core::runner::{FrameInput, SessionRunner};
use crate::types::{
    CountdownIndicator, Landmark, Phase, RenderFrame, SessionEvent, SessionReport, POSE_CONNECTIONS,
};

/// Frames buffered between the HTTP handler and the session task
const FRAME_QUEUE: usize = 64;

/// Live status derived from the latest render frame
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub phase: Phase,
    pub challenge_index: usize,
    pub challenge_count: usize,
    pub challenge_name: String,
    pub display_score: f64,
    pub countdown: Option<CountdownIndicator>,
    pub finished: bool,
}

impl SessionStatus {
    fn from_frame(frame: &RenderFrame) -> Self {
        Self {
            phase: frame.phase,
            challenge_index: frame.challenge_index,
            challenge_count: frame.challenge_count,
            challenge_name: frame.challenge_name.clone(),
            display_score: frame.score,
            countdown: frame.countdown,
            finished: frame.phase == Phase::Finished,
        }
    }
}

/// Frame accepted response
#[derive(Debug, Serialize)]
pub struct FrameResponse {
    /// False when the queue was full and the frame was dropped
    pub accepted: bool,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub phase: Phase,
}

/// App state
pub struct AppState {
    pub frames_tx: mpsc::Sender<FrameInput>,
    pub render_tx: broadcast::Sender<RenderFrame>,
    pub status_rx: watch::Receiver<SessionStatus>,
    pub report_rx: watch::Receiver<Option<SessionReport>>,
}

/// Sink that publishes to the bridge's channels
struct BridgeSink {
    render_tx: broadcast::Sender<RenderFrame>,
    status_tx: watch::Sender<SessionStatus>,
    report_tx: watch::Sender<Option<SessionReport>>,
}

impl RenderSink for BridgeSink {
    fn draw(&mut self, frame: &RenderFrame) {
        // No subscribers is fine
        let _ = self.render_tx.send(frame.clone());
        self.status_tx.send_replace(SessionStatus::from_frame(frame));
    }

    fn event(&mut self, event: &SessionEvent) {
        if let SessionEvent::Finished { report } = event {
            self.report_tx.send_replace(Some(report.clone()));
        }
    }
}

/// Start the session task and return the shared state
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(config: SessionConfig) -> Arc<AppState> {
    let (frames_tx, frames_rx) = mpsc::channel(FRAME_QUEUE);
    let (render_tx, _) = broadcast::channel(100);

    let initial = crate::core::session::ChallengeSession::new(&config).render(None);
    let (status_tx, status_rx) = watch::channel(SessionStatus::from_frame(&initial));
    let (report_tx, report_rx) = watch::channel(None);

    let sink = BridgeSink {
        render_tx: render_tx.clone(),
        status_tx,
        report_tx,
    };

    tokio::spawn(async move {
        let mut runner = SessionRunner::new(&config, sink);
        match runner.run(frames_rx).await {
            Ok(report) => info!(mean = report.mean, "bridge session finished"),
            Err(e) => warn!("bridge session ended: {}", e),
        }
    });

    Arc::new(AppState {
        frames_tx,
        render_tx,
        status_rx,
        report_rx,
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/connections", get(connections))
        .route("/frame", post(push_frame))
        .route("/status", get(get_status))
        .route("/report", get(get_report))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        phase: state.status_rx.borrow().phase,
    })
}

/// Static overlay connection list
async fn connections() -> Json<Vec<(Landmark, Landmark)>> {
    Json(POSE_CONNECTIONS.to_vec())
}

/// Push one detector frame
async fn push_frame(
    State(state): State<Arc<AppState>>,
    Json(frame): Json<FrameInput>,
) -> Result<(StatusCode, Json<FrameResponse>), StatusCode> {
    match state.frames_tx.try_send(frame) {
        Ok(()) => Ok((StatusCode::ACCEPTED, Json(FrameResponse { accepted: true }))),
        Err(mpsc::error::TrySendError::Full(_)) => {
            warn!("frame queue full, dropping frame");
            Ok((StatusCode::ACCEPTED, Json(FrameResponse { accepted: false })))
        }
        Err(mpsc::error::TrySendError::Closed(_)) => Err(StatusCode::GONE),
    }
}

/// Get session status
async fn get_status(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    Json(state.status_rx.borrow().clone())
}

/// Get the final report
async fn get_report(State(state): State<Arc<AppState>>) -> Result<Json<SessionReport>, StatusCode> {
    let report = state.report_rx.borrow().clone();
    report.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// WebSocket handler for live render frames
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.render_tx.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward render frames until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<RenderFrame>) {
    let (mut sender, mut receiver) = socket.split();

    let mut forward = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(frame) => {
                    let json = serde_json::to_string(&frame).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                // Slow display: skip ahead to the newest frames
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut watch_close = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward => watch_close.abort(),
        _ = &mut watch_close => forward.abort(),
    }
}

/// Run the bridge server
pub async fn run_server(addr: &str, config: SessionConfig) -> std::io::Result<()> {
    let state = spawn_session(config);
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "pose bridge listening");
    println!("PoseMatch bridge running on {}", addr);
    println!("  POST /frame   - Push detector frame");
    println!("  GET  /status  - Session status");
    println!("  GET  /report  - Final report");
    println!("  WS   /ws      - Live render frames");
    println!("  GET  /connections - Overlay bones");
    println!("  GET  /health  - Health check");
    axum::serve(listener, router).await
}
