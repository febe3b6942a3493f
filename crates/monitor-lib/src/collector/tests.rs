use super::*;

fn fast_collector() -> SystemCollector {
    // The interval gets clamped up to MINIMUM_CPU_UPDATE_INTERVAL; this just
    // keeps the test from sleeping two full seconds.
    SystemCollector::with_config(CollectorConfig {
        sample_interval: Duration::from_millis(1),
    })
}

fn row(pid: u32, cpu: f32) -> ProcessInfo {
    ProcessInfo {
        pid,
        name: format!("proc-{pid}"),
        cpu_percent: cpu,
        memory_percent: 0.0,
        status: "Runnable".to_string(),
    }
}

#[test]
fn rank_keeps_at_most_ten_rows() {
    let rows: Vec<ProcessInfo> = (0..25).map(|i| row(i, i as f32)).collect();
    let ranked = rank_processes(rows);

    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].pid, 24);
}

#[test]
fn rank_sorts_cpu_descending() {
    let ranked = rank_processes(vec![row(1, 2.0), row(2, 9.5), row(3, 0.1), row(4, 9.5)]);

    for pair in ranked.windows(2) {
        assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
    }
}

#[test]
fn rank_preserves_enumeration_order_on_ties() {
    let ranked = rank_processes(vec![row(10, 5.0), row(20, 5.0), row(30, 5.0)]);

    let pids: Vec<u32> = ranked.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![10, 20, 30]);
}

#[test]
fn rounding_helpers() {
    assert_eq!(round2(1.2345), 1.23);
    assert_eq!(round2(1.236), 1.24);
    assert_eq!(round1(12.34), 12.3);
    assert_eq!(round1(12.36), 12.4);
}

#[test]
fn snapshot_top_processes_bounded_and_sorted() {
    let snapshot = fast_collector().collect();

    assert!(snapshot.top_processes.len() <= 10);
    for pair in snapshot.top_processes.windows(2) {
        assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
    }
}

#[test]
fn snapshot_memory_percent_in_range() {
    let snapshot = fast_collector().collect();

    assert!((0.0..=100.0).contains(&snapshot.memory.percent));
    assert!(snapshot.memory.used_gb >= 0.0);
    assert!(snapshot.memory.available_gb >= 0.0);
}

#[test]
fn snapshot_has_per_core_series() {
    let snapshot = fast_collector().collect();

    assert!(!snapshot.cpu_per_core.is_empty());
    for core in &snapshot.cpu_per_core {
        assert!(*core >= 0.0);
    }
    assert!(snapshot.cpu_overall >= 0.0);
}

#[test]
fn snapshot_timestamp_shape() {
    let snapshot = fast_collector().collect();

    assert_eq!(snapshot.timestamp.len(), 19);
    chrono::NaiveDateTime::parse_from_str(&snapshot.timestamp, "%Y-%m-%d %H:%M:%S")
        .expect("timestamp should parse back");
}

#[test]
fn disk_counters_monotonic_across_snapshots() {
    let collector = fast_collector();
    let first = collector.collect();
    let second = collector.collect();

    // Cumulative-since-boot counters never move backwards within a boot.
    assert!(second.disk_io.read_mb >= first.disk_io.read_mb);
    assert!(second.disk_io.write_mb >= first.disk_io.write_mb);
}
