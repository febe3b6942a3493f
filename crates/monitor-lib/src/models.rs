//! Core data models for the system dashboard

use serde::{Deserialize, Serialize};

/// Point-in-time capture of host metrics.
///
/// Built fresh on every request and never persisted. The sub-metrics are
/// read across two CPU sampling windows, so the snapshot is internally
/// consistent only at the instant of capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Aggregate CPU utilization, 0-100.
    pub cpu_overall: f32,
    /// Per-core utilization, one entry per logical CPU, in core order.
    pub cpu_per_core: Vec<f32>,
    pub memory: MemoryMetrics,
    /// Cumulative disk counters since boot.
    pub disk_io: DiskIoMetrics,
    /// At most ten entries, sorted by `cpu_percent` descending.
    pub top_processes: Vec<ProcessInfo>,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub used_gb: f64,
    pub available_gb: f64,
    pub percent: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskIoMetrics {
    pub read_mb: f64,
    pub write_mb: f64,
}

/// One row of the process table.
///
/// Read directly from the OS process table at snapshot time; may be stale
/// immediately after capture (the process can exit at any point).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub status: String,
}

/// Lifecycle signal an operator can send to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessAction {
    Suspend,
    Resume,
    Terminate,
}

impl ProcessAction {
    /// Past-tense verb for operator-facing success messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            ProcessAction::Suspend => "suspended",
            ProcessAction::Resume => "resumed",
            ProcessAction::Terminate => "terminated",
        }
    }

    /// Infinitive verb for error messages ("Access denied to suspend ...").
    pub fn verb(&self) -> &'static str {
        match self {
            ProcessAction::Suspend => "suspend",
            ProcessAction::Resume => "resume",
            ProcessAction::Terminate => "terminate",
        }
    }
}

impl std::fmt::Display for ProcessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// How the OS answered a lifecycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Success,
    NotFound,
    AccessDenied,
    OtherError,
}

impl ActionOutcome {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOutcome::Success => "success",
            ActionOutcome::NotFound => "not_found",
            ActionOutcome::AccessDenied => "access_denied",
            ActionOutcome::OtherError => "other_error",
        }
    }
}

/// Result of a single controller operation.
///
/// Reflects only whether the signal was accepted by the OS, not its
/// eventual effect on the target process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessActionResult {
    pub pid: u32,
    pub action: ProcessAction,
    pub outcome: ActionOutcome,
    pub message: String,
}

impl ProcessActionResult {
    pub fn is_success(&self) -> bool {
        self.outcome == ActionOutcome::Success
    }
}
