//! Library crate for the local system dashboard
//!
//! This crate provides the core functionality for:
//! - On-demand host metrics collection (CPU, memory, disk I/O, processes)
//! - Process lifecycle control (suspend/resume/terminate by pid)
//! - Health checks and observability

pub mod collector;
pub mod control;
pub mod health;
pub mod models;
pub mod observability;

pub use collector::{CollectorConfig, SnapshotSource, SystemCollector};
pub use control::{ProcessControl, SignalController, SignalError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{DashboardMetrics, StructuredLogger};
