//! `sysdash suspend|resume|terminate|health` - process control and health

use crate::client::{ApiClient, HealthResponse};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;

/// POST one control action and report the outcome. Error outcomes exit
/// non-zero so the command is scriptable.
pub async fn run_action(client: &ApiClient, action: &str, pid: u32) -> Result<()> {
    let (status, body) = client.post_action(&format!("/{action}/{pid}")).await?;

    if status.is_success() {
        output::print_success(&body.message);
        Ok(())
    } else {
        output::print_error(&body.message);
        anyhow::bail!("{action} {pid} failed ({status})")
    }
}

pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        let raw: serde_json::Value = client.get("/healthz").await?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let health: HealthResponse = client.get("/healthz").await?;
    println!(
        "{} {}",
        "Overall".bold(),
        output::color_status(&health.status)
    );

    let mut names: Vec<&String> = health.components.keys().collect();
    names.sort();
    for name in names {
        let component = &health.components[name];
        match &component.message {
            Some(message) => println!(
                "  {name}: {} ({message})",
                output::color_status(&component.status)
            ),
            None => println!("  {name}: {}", output::color_status(&component.status)),
        }
    }

    Ok(())
}
