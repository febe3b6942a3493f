//! sysdash-server - local system-monitoring dashboard
//!
//! Serves host metrics (CPU, memory, disk I/O, top processes) as JSON and
//! as an HTML page, and lets an operator suspend, resume, or terminate a
//! process by pid.

use anyhow::Result;
use monitor_lib::{
    health::{components, HealthRegistry},
    CollectorConfig, DashboardMetrics, SignalController, StructuredLogger, SystemCollector,
};
use std::sync::Arc;
use std::time::Duration;
use sysdash_server::{api, config};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting sysdash-server");

    let config = config::ServerConfig::load()?;
    let bind_addr = config.bind_addr();
    info!(addr = %bind_addr, "Server configured");

    let health_registry = HealthRegistry::new();
    health_registry.register(components::COLLECTOR).await;
    health_registry.register(components::CONTROLLER).await;

    let metrics = DashboardMetrics::new();

    let logger = StructuredLogger::new(&config.bind_host);
    logger.log_startup(SERVER_VERSION, &bind_addr);

    let collector = SystemCollector::with_config(CollectorConfig {
        sample_interval: Duration::from_secs(config.sample_interval_secs),
    });

    let app_state = Arc::new(api::AppState::new(
        Arc::new(collector),
        Arc::new(SignalController::new()),
        health_registry.clone(),
        metrics.clone(),
    ));

    let server = tokio::spawn(api::serve(bind_addr, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");
    server.abort();

    Ok(())
}
