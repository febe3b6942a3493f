//! `sysdash metrics` - fetch and display a snapshot

use crate::client::{ApiClient, MetricsSnapshot};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;

pub async fn show_metrics(client: &ApiClient, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        let raw: serde_json::Value = client.get("/metrics").await?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let snapshot: MetricsSnapshot = client.get("/metrics").await?;
    print_summary(&snapshot);
    output::print_table(&snapshot.top_processes, format);

    Ok(())
}

fn print_summary(snapshot: &MetricsSnapshot) {
    println!("{} {}", "Captured".bold(), snapshot.timestamp);

    let per_core = snapshot
        .cpu_per_core
        .iter()
        .map(|core| output::format_percent(*core))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{}  {} (per core: {})",
        "CPU".bold(),
        output::format_percent(snapshot.cpu_overall),
        per_core
    );

    println!(
        "{}  {} ({:.2} GB used, {:.2} GB available)",
        "Memory".bold(),
        output::format_percent(snapshot.memory.percent),
        snapshot.memory.used_gb,
        snapshot.memory.available_gb
    );

    println!(
        "{}  {:.2} MB read, {:.2} MB written since boot",
        "Disk".bold(),
        snapshot.disk_io.read_mb,
        snapshot.disk_io.write_mb
    );
}
