//! Observability for the dashboard server
//!
//! Prometheus self-metrics (snapshot latency, action outcomes) and a small
//! structured-logging wrapper over `tracing`. These measure the server
//! itself; the host metrics it reports live in [`crate::collector`].

use crate::models::ProcessActionResult;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::info;

/// Snapshot collection blocks through two CPU sampling windows, so latency
/// lands in whole seconds rather than the usual sub-millisecond buckets.
const SNAPSHOT_LATENCY_BUCKETS: &[f64] = &[0.25, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 10.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<DashboardMetricsInner> = OnceLock::new();

struct DashboardMetricsInner {
    snapshot_latency_seconds: Histogram,
    snapshots_total: IntCounter,
    control_actions_total: IntCounterVec,
    top_processes_reported: IntGauge,
}

impl DashboardMetricsInner {
    fn new() -> Self {
        Self {
            snapshot_latency_seconds: register_histogram!(
                "sysdash_snapshot_latency_seconds",
                "Time spent capturing one metrics snapshot",
                SNAPSHOT_LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register snapshot_latency_seconds"),

            snapshots_total: register_int_counter!(
                "sysdash_snapshots_total",
                "Total number of metrics snapshots served"
            )
            .expect("Failed to register snapshots_total"),

            control_actions_total: register_int_counter_vec!(
                "sysdash_control_actions_total",
                "Process control actions by action and outcome",
                &["action", "outcome"]
            )
            .expect("Failed to register control_actions_total"),

            top_processes_reported: register_int_gauge!(
                "sysdash_top_processes_reported",
                "Number of process rows in the most recent snapshot"
            )
            .expect("Failed to register top_processes_reported"),
        }
    }
}

/// Lightweight handle to the global metrics instance.
///
/// Clones share the same underlying Prometheus collectors.
#[derive(Clone)]
pub struct DashboardMetrics {
    _private: (),
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(DashboardMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &DashboardMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record one served snapshot and how long it took to capture.
    pub fn observe_snapshot(&self, duration_secs: f64, process_rows: usize) {
        self.inner().snapshot_latency_seconds.observe(duration_secs);
        self.inner().snapshots_total.inc();
        self.inner()
            .top_processes_reported
            .set(process_rows as i64);
    }

    /// Record the outcome of one control action.
    pub fn observe_control_action(&self, result: &ProcessActionResult) {
        self.inner()
            .control_actions_total
            .with_label_values(&[result.action.verb(), result.outcome.as_str()])
            .inc();
    }
}

/// Structured logger for server lifecycle events
#[derive(Clone)]
pub struct StructuredLogger {
    host: String,
}

impl StructuredLogger {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn log_startup(&self, version: &str, bind_addr: &str) {
        info!(
            event = "server_started",
            host = %self.host,
            version = %version,
            bind_addr = %bind_addr,
            "Dashboard server started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "server_stopped",
            host = %self.host,
            reason = %reason,
            "Dashboard server stopped"
        );
    }
}
