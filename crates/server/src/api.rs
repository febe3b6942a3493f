//! HTTP API: dashboard page, snapshot JSON, process control, and health

use crate::page;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use monitor_lib::{
    health::{components, ComponentStatus},
    ActionOutcome, DashboardMetrics, HealthRegistry, MetricsSnapshot, ProcessActionResult,
    ProcessControl, SnapshotSource,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared application state
///
/// Constructed once at startup and handed to every handler; there are no
/// module-level singletons. Collector and controller sit behind trait
/// objects so tests can stub them.
#[derive(Clone)]
pub struct AppState {
    pub snapshots: Arc<dyn SnapshotSource>,
    pub control: Arc<dyn ProcessControl>,
    pub health_registry: HealthRegistry,
    pub metrics: DashboardMetrics,
}

impl AppState {
    pub fn new(
        snapshots: Arc<dyn SnapshotSource>,
        control: Arc<dyn ProcessControl>,
        health_registry: HealthRegistry,
        metrics: DashboardMetrics,
    ) -> Self {
        Self {
            snapshots,
            control,
            health_registry,
            metrics,
        }
    }
}

/// JSON body for the control endpoints.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: &'static str,
    pub message: String,
}

/// Capture a snapshot off the async runtime.
///
/// `collect()` sleeps through two sampling windows, so it runs on the
/// blocking pool. The only failure here is a panicked worker.
async fn collect_snapshot(state: &AppState) -> Result<MetricsSnapshot, StatusCode> {
    let source = Arc::clone(&state.snapshots);
    let started = Instant::now();

    match tokio::task::spawn_blocking(move || source.collect()).await {
        Ok(snapshot) => {
            state
                .metrics
                .observe_snapshot(started.elapsed().as_secs_f64(), snapshot.top_processes.len());
            state.health_registry.set_healthy(components::COLLECTOR).await;
            Ok(snapshot)
        }
        Err(err) => {
            error!(error = %err, "Snapshot worker failed");
            state
                .health_registry
                .set_unhealthy(components::COLLECTOR, "snapshot worker panicked")
                .await;
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `GET /` - dashboard page with the snapshot embedded
async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    let snapshot = collect_snapshot(&state).await?;
    Ok(Html(page::render_dashboard(&snapshot)))
}

/// `GET /metrics` - snapshot as JSON
async fn metrics(State(state): State<Arc<AppState>>) -> Result<Json<MetricsSnapshot>, StatusCode> {
    let snapshot = collect_snapshot(&state).await?;
    Ok(Json(snapshot))
}

fn action_response(result: ProcessActionResult) -> (StatusCode, Json<ActionResponse>) {
    let status_code = match result.outcome {
        ActionOutcome::Success => StatusCode::OK,
        ActionOutcome::NotFound => StatusCode::NOT_FOUND,
        ActionOutcome::AccessDenied => StatusCode::FORBIDDEN,
        ActionOutcome::OtherError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let status = if result.is_success() { "success" } else { "error" };

    (
        status_code,
        Json(ActionResponse {
            status,
            message: result.message,
        }),
    )
}

async fn run_action(
    state: &AppState,
    result: ProcessActionResult,
) -> (StatusCode, Json<ActionResponse>) {
    state.metrics.observe_control_action(&result);
    state
        .health_registry
        .set_healthy(components::CONTROLLER)
        .await;
    action_response(result)
}

/// `POST /suspend/{pid}`
async fn suspend(State(state): State<Arc<AppState>>, Path(pid): Path<u32>) -> impl IntoResponse {
    let result = state.control.suspend(pid);
    run_action(&state, result).await
}

/// `POST /resume/{pid}`
async fn resume(State(state): State<Arc<AppState>>, Path(pid): Path<u32>) -> impl IntoResponse {
    let result = state.control.resume(pid);
    run_action(&state, result).await
}

/// `POST /terminate/{pid}`
async fn terminate(State(state): State<Arc<AppState>>, Path(pid): Path<u32>) -> impl IntoResponse {
    let result = state.control.terminate(pid);
    run_action(&state, result).await
}

/// Health check - 200 while operational, 503 once a component has failed
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check - 200 once listening, 503 before that
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus exposition of the server's own metrics. `/metrics` is the
/// snapshot endpoint, so this lives under a separate path.
async fn telemetry() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "Failed to encode telemetry");
        return (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/metrics", get(metrics))
        .route("/suspend/:pid", post(suspend))
        .route("/resume/:pid", post(resume))
        .route("/terminate/:pid", post(terminate))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/telemetry", get(telemetry))
        .with_state(state)
}

/// Bind and serve. Readiness flips on only after the listener is up.
pub async fn serve(addr: String, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state.clone());

    info!(addr = %addr, "Starting dashboard server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    state.health_registry.set_ready(true).await;

    axum::serve(listener, app).await?;

    Ok(())
}
