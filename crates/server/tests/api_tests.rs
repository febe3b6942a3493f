//! Integration tests for the dashboard HTTP API
//!
//! Runs the real router against stubbed collector/controller seams, so no
//! test sleeps through sampling windows or signals a live process.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use monitor_lib::{
    health::components, ActionOutcome, DashboardMetrics, DiskIoMetrics, HealthRegistry,
    MemoryMetrics, MetricsSnapshot, ProcessAction, ProcessActionResult, ProcessControl,
    ProcessInfo, SignalError, SnapshotSource,
};
use std::sync::Arc;
use sysdash_server::api::{create_router, AppState};
use tower::ServiceExt;

const LIVE_PID: u32 = 42;
const PROTECTED_PID: u32 = 1;

fn sample_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        cpu_overall: 23.4,
        cpu_per_core: vec![20.1, 26.7],
        memory: MemoryMetrics {
            used_gb: 4.2,
            available_gb: 11.8,
            percent: 26.3,
        },
        disk_io: DiskIoMetrics {
            read_mb: 1500.25,
            write_mb: 900.5,
        },
        top_processes: vec![
            ProcessInfo {
                pid: LIVE_PID,
                name: "firefox".to_string(),
                cpu_percent: 12.3,
                memory_percent: 4.5,
                status: "Runnable".to_string(),
            },
            ProcessInfo {
                pid: 99,
                name: "rustc".to_string(),
                cpu_percent: 8.1,
                memory_percent: 2.0,
                status: "Sleeping".to_string(),
            },
        ],
        timestamp: "2026-08-07 12:00:00".to_string(),
    }
}

struct StubSource;

impl SnapshotSource for StubSource {
    fn collect(&self) -> MetricsSnapshot {
        sample_snapshot()
    }
}

/// Stub controller: one live pid, one protected pid, everything else gone.
/// Messages reuse the production error formatting.
struct StubControl;

impl StubControl {
    fn act(&self, pid: u32, action: ProcessAction) -> ProcessActionResult {
        match pid {
            LIVE_PID => ProcessActionResult {
                pid,
                action,
                outcome: ActionOutcome::Success,
                message: format!("Process {pid} {}", action.past_tense()),
            },
            PROTECTED_PID => {
                let err = SignalError::AccessDenied { pid, action };
                ProcessActionResult {
                    pid,
                    action,
                    outcome: ActionOutcome::AccessDenied,
                    message: err.to_string(),
                }
            }
            _ => ProcessActionResult {
                pid,
                action,
                outcome: ActionOutcome::NotFound,
                message: SignalError::NotFound(pid).to_string(),
            },
        }
    }
}

impl ProcessControl for StubControl {
    fn suspend(&self, pid: u32) -> ProcessActionResult {
        self.act(pid, ProcessAction::Suspend)
    }

    fn resume(&self, pid: u32) -> ProcessActionResult {
        self.act(pid, ProcessAction::Resume)
    }

    fn terminate(&self, pid: u32) -> ProcessActionResult {
        self.act(pid, ProcessAction::Terminate)
    }
}

async fn setup_test_app() -> (Router, Arc<AppState>) {
    let health_registry = HealthRegistry::new();
    health_registry.register(components::COLLECTOR).await;
    health_registry.register(components::CONTROLLER).await;

    let state = Arc::new(AppState::new(
        Arc::new(StubSource),
        Arc::new(StubControl),
        health_registry,
        DashboardMetrics::new(),
    ));
    let router = create_router(state.clone());

    (router, state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn metrics_returns_snapshot_field_names() {
    let (app, _state) = setup_test_app().await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await;
    assert_eq!(snapshot["cpu_overall"], 23.4);
    assert_eq!(snapshot["cpu_per_core"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["memory"]["used_gb"], 4.2);
    assert_eq!(snapshot["memory"]["percent"], 26.3);
    assert_eq!(snapshot["disk_io"]["read_mb"], 1500.25);
    assert_eq!(snapshot["top_processes"][0]["name"], "firefox");
    assert_eq!(snapshot["timestamp"], "2026-08-07 12:00:00");
}

#[tokio::test]
async fn terminate_unknown_pid_returns_404_with_message() {
    let (app, _state) = setup_test_app().await;

    let response = app.oneshot(post("/terminate/99999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Process 99999999 not found");
}

#[tokio::test]
async fn suspend_protected_pid_returns_403() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post(&format!("/suspend/{PROTECTED_PID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        format!("Access denied to suspend process {PROTECTED_PID}")
    );
}

#[tokio::test]
async fn suspend_live_pid_returns_success() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post(&format!("/suspend/{LIVE_PID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], format!("Process {LIVE_PID} suspended"));
}

#[tokio::test]
async fn resume_live_pid_returns_success() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post(&format!("/resume/{LIVE_PID}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], format!("Process {LIVE_PID} resumed"));
}

#[tokio::test]
async fn non_numeric_pid_is_rejected() {
    let (app, _state) = setup_test_app().await;

    let response = app.oneshot(post("/suspend/not-a-pid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_pid_is_rejected() {
    let (app, _state) = setup_test_app().await;

    let response = app.oneshot(post("/terminate/-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_page_embeds_snapshot() {
    let (app, _state) = setup_test_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("firefox"));
    assert!(page.contains("cpu_per_core"));
}

#[tokio::test]
async fn healthz_reports_components() {
    let (app, _state) = setup_test_app().await;

    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert!(health["components"]["collector"].is_object());
    assert!(health["components"]["controller"].is_object());
}

#[tokio::test]
async fn readyz_follows_ready_flag() {
    let (app, state) = setup_test_app().await;

    let response = app.clone().oneshot(get("/readyz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.health_registry.set_ready(true).await;
    let response = app.oneshot(get("/readyz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn telemetry_exposes_prometheus_text() {
    let (app, _state) = setup_test_app().await;

    // Serve one snapshot and one action so the collectors have samples.
    let _ = app.clone().oneshot(get("/metrics")).await.unwrap();
    let _ = app
        .clone()
        .oneshot(post(&format!("/suspend/{LIVE_PID}")))
        .await
        .unwrap();

    let response = app.oneshot(get("/telemetry")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("sysdash_snapshot_latency_seconds"));
    assert!(text.contains("sysdash_control_actions_total"));
}
