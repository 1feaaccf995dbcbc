//! Health check reporting
//!
//! This module provides the health report served on `/health`.

use crate::service::app::AppState;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Health check status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "✅ healthy"),
            HealthStatus::Unhealthy => write!(f, "❌ unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Optional error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Service statistics
    pub stats: ServiceStats,
}

/// Service statistics for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Appointments currently held in memory
    pub appointments_stored: usize,
    /// Seconds since startup
    pub uptime_seconds: u64,
    /// When the service started
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheck {
    /// Check that the appointment store is readable and gather statistics
    pub fn check(app_state: &AppState) -> Self {
        let uptime = app_state.uptime();
        let metrics = app_state.metrics();

        let (status, message, appointments_stored) =
            match app_state.appointments().store().count() {
                Ok(count) => (HealthStatus::Healthy, None, count),
                Err(e) => {
                    error!("Appointment store health check failed: {}", e);
                    (HealthStatus::Unhealthy, Some(e.to_string()), 0)
                }
            };

        metrics.update_health_status(status == HealthStatus::Healthy);
        metrics.update_uptime(uptime);

        HealthCheck {
            status,
            service: app_state.config().service.name.clone(),
            version: crate::VERSION.to_string(),
            timestamp: chrono::Utc::now(),
            message,
            stats: ServiceStats {
                appointments_stored,
                uptime_seconds: uptime.as_secs(),
                started_at: app_state.started_at(),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize health check: {}", e))
    }
}
