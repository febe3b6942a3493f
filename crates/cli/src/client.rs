//! API client for the dashboard server

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use tabled::Tabled;
use url::Url;

pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            // A snapshot blocks through two sampling windows server-side;
            // leave generous headroom on top of that.
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// POST a control action.
    ///
    /// The server encodes the outcome in the HTTP status, and non-2xx
    /// responses still carry the JSON body we want to show, so this does
    /// not bail on error statuses.
    pub async fn post_action(&self, path: &str) -> Result<(StatusCode, ActionResponse)> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .json::<ActionResponse>()
            .await
            .context("Failed to parse response")?;

        Ok((status, body))
    }
}

// API response types

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsSnapshot {
    pub cpu_overall: f32,
    pub cpu_per_core: Vec<f32>,
    pub memory: MemoryMetrics,
    pub disk_io: DiskIoMetrics,
    pub top_processes: Vec<ProcessRow>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemoryMetrics {
    pub used_gb: f64,
    pub available_gb: f64,
    pub percent: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiskIoMetrics {
    pub read_mb: f64,
    pub write_mb: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Tabled)]
pub struct ProcessRow {
    #[tabled(rename = "PID")]
    pub pid: u32,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "CPU %")]
    pub cpu_percent: f32,
    #[tabled(rename = "MEM %")]
    pub memory_percent: f32,
    #[tabled(rename = "STATUS")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}
