//! Host metrics collection
//!
//! Produces a [`MetricsSnapshot`] from the OS on demand. CPU utilization is
//! derived from two counter reads separated by a fixed sampling window, so
//! `collect()` blocks for roughly two windows (about two seconds with the
//! default configuration). Callers that cannot block should run it on a
//! blocking thread pool.

#[cfg(test)]
mod tests;

use crate::models::{DiskIoMetrics, MemoryMetrics, MetricsSnapshot, ProcessInfo};
use std::cmp::Ordering;
use std::thread;
use std::time::Duration;
use sysinfo::{Disks, ProcessRefreshKind, ProcessesToUpdate, System};

/// Maximum number of rows kept in `top_processes`.
const TOP_PROCESS_LIMIT: usize = 10;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Trait for snapshot producers
///
/// The HTTP layer depends on this seam so tests can substitute a stub that
/// does not sleep through the sampling windows.
pub trait SnapshotSource: Send + Sync {
    /// Capture a fresh snapshot. Infallible by contract: per-process read
    /// failures are dropped from the result, never propagated.
    fn collect(&self) -> MetricsSnapshot;
}

/// Collector configuration
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Length of one CPU sampling window. `collect()` blocks for two of
    /// these back to back.
    pub sample_interval: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_secs(1),
        }
    }
}

/// Snapshot producer backed by the live OS via `sysinfo`.
///
/// Stateless across calls: every `collect()` starts from a fresh `System`
/// so concurrent invocations share no mutable data.
pub struct SystemCollector {
    config: CollectorConfig,
}

impl Default for SystemCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCollector {
    pub fn new() -> Self {
        Self::with_config(CollectorConfig::default())
    }

    pub fn with_config(config: CollectorConfig) -> Self {
        Self { config }
    }

    fn sample_interval(&self) -> Duration {
        // Below this the kernel counters have not moved and every reading
        // comes back zero.
        self.config
            .sample_interval
            .max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
    }
}

impl SnapshotSource for SystemCollector {
    fn collect(&self) -> MetricsSnapshot {
        let interval = self.sample_interval();
        let mut sys = System::new();

        // Prime the CPU and process counters; utilization is the delta
        // between this read and the ones after the sampling windows.
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );

        // First window: aggregate utilization.
        thread::sleep(interval);
        sys.refresh_cpu_all();
        let cpu_overall = round1(sys.global_cpu_usage());

        // Second window: per-core series. Process CPU deltas end up
        // spanning both windows.
        thread::sleep(interval);
        sys.refresh_cpu_all();
        let cpu_per_core: Vec<f32> = sys.cpus().iter().map(|cpu| round1(cpu.cpu_usage())).collect();

        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );

        let snapshot = MetricsSnapshot {
            cpu_overall,
            cpu_per_core,
            memory: read_memory(&sys),
            disk_io: read_disk_io(),
            top_processes: rank_processes(process_table(&sys)),
            timestamp: capture_timestamp(),
        };

        tracing::debug!(
            cpu_overall = snapshot.cpu_overall,
            processes = snapshot.top_processes.len(),
            "Captured metrics snapshot"
        );

        snapshot
    }
}

fn read_memory(sys: &System) -> MemoryMetrics {
    let total = sys.total_memory();
    let available = sys.available_memory();
    let used = sys.used_memory();

    let percent = if total == 0 {
        0.0
    } else {
        round1((total.saturating_sub(available) as f64 / total as f64 * 100.0) as f32)
    };

    MemoryMetrics {
        used_gb: round2(used as f64 / BYTES_PER_GB),
        available_gb: round2(available as f64 / BYTES_PER_GB),
        percent,
    }
}

/// Sum cumulative read/write counters over all block devices.
fn read_disk_io() -> DiskIoMetrics {
    let disks = Disks::new_with_refreshed_list();

    let mut read_bytes: u64 = 0;
    let mut written_bytes: u64 = 0;
    for disk in disks.list() {
        let usage = disk.usage();
        read_bytes = read_bytes.saturating_add(usage.total_read_bytes);
        written_bytes = written_bytes.saturating_add(usage.total_written_bytes);
    }

    DiskIoMetrics {
        read_mb: round2(read_bytes as f64 / BYTES_PER_MB),
        write_mb: round2(written_bytes as f64 / BYTES_PER_MB),
    }
}

/// Flatten the refreshed process table into rows.
///
/// Processes that exited between refreshes were already pruned by the
/// refresh itself; anything left without a readable name (kernel workers on
/// some platforms) is skipped the same way. Dropping entries is the
/// documented behavior, not an error path.
fn process_table(sys: &System) -> Vec<ProcessInfo> {
    let total_memory = sys.total_memory();

    let mut rows = Vec::with_capacity(sys.processes().len());
    for (pid, process) in sys.processes() {
        let name = process.name().to_string_lossy();
        if name.is_empty() {
            continue;
        }

        let memory_percent = if total_memory == 0 {
            0.0
        } else {
            round1((process.memory() as f64 / total_memory as f64 * 100.0) as f32)
        };

        rows.push(ProcessInfo {
            pid: pid.as_u32(),
            name: name.into_owned(),
            cpu_percent: round1(process.cpu_usage()),
            memory_percent,
            status: process.status().to_string(),
        });
    }
    rows
}

/// Sort by CPU descending and keep the top rows.
///
/// The sort is stable, so rows with equal `cpu_percent` keep their
/// enumeration order; there is no secondary key.
fn rank_processes(mut rows: Vec<ProcessInfo>) -> Vec<ProcessInfo> {
    rows.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(TOP_PROCESS_LIMIT);
    rows
}

fn capture_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
