//! Dashboard page rendering
//!
//! The page is a static template with the freshly collected snapshot
//! embedded as a JSON blob; a small inline script renders the tables and
//! wires the control buttons to the POST endpoints.

use monitor_lib::MetricsSnapshot;

const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");
const SNAPSHOT_PLACEHOLDER: &str = "__SNAPSHOT__";

/// Render the dashboard page for one snapshot.
pub fn render_dashboard(snapshot: &MetricsSnapshot) -> String {
    let json = serde_json::to_string(snapshot).unwrap_or_else(|_| "null".to_string());
    // A `</script>` inside a process name must not close the inline block.
    let json = json.replace('<', "\\u003c");

    DASHBOARD_TEMPLATE.replace(SNAPSHOT_PLACEHOLDER, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_lib::{DiskIoMetrics, MemoryMetrics, ProcessInfo};

    fn snapshot_with_name(name: &str) -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_overall: 7.5,
            cpu_per_core: vec![5.0, 10.0],
            memory: MemoryMetrics {
                used_gb: 3.5,
                available_gb: 12.5,
                percent: 21.9,
            },
            disk_io: DiskIoMetrics {
                read_mb: 100.0,
                write_mb: 200.0,
            },
            top_processes: vec![ProcessInfo {
                pid: 1234,
                name: name.to_string(),
                cpu_percent: 7.5,
                memory_percent: 1.2,
                status: "Runnable".to_string(),
            }],
            timestamp: "2026-08-07 12:00:00".to_string(),
        }
    }

    #[test]
    fn page_embeds_the_snapshot() {
        let page = render_dashboard(&snapshot_with_name("firefox"));

        assert!(page.contains("firefox"));
        assert!(page.contains("2026-08-07 12:00:00"));
        assert!(!page.contains(SNAPSHOT_PLACEHOLDER));
    }

    #[test]
    fn script_breakout_is_escaped() {
        let page = render_dashboard(&snapshot_with_name("</script><script>alert(1)"));

        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains("\\u003c/script"));
    }
}
