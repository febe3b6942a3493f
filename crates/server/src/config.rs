//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Server configuration
///
/// Overridable through `SYSDASH_*` environment variables
/// (`SYSDASH_BIND_HOST`, `SYSDASH_PORT`, `SYSDASH_SAMPLE_INTERVAL_SECS`);
/// falls back to a local-only listener on port 5000.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind; local-only by default.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Length of one CPU sampling window in seconds. A snapshot blocks for
    /// two of these.
    #[serde(default = "default_sample_interval")]
    pub sample_interval_secs: u64,
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_sample_interval() -> u64 {
    1
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            sample_interval_secs: default_sample_interval(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment, keeping defaults for
    /// anything unset.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("SYSDASH"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
