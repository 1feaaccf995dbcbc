//! Main application state
//!
//! `AppState` is the explicit context handed to the HTTP layer. It owns the
//! configuration, the appointment store (behind the service) and the metrics
//! collector; every clone shares the same store.

use crate::config::{validate_config, AppConfig};
use crate::metrics::MetricsCollector;
use crate::service::appointments::AppointmentService;
use crate::store::{AppointmentStore, InMemoryAppointmentStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Main application state containing all service components
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<AppConfig>,

    /// Appointment operations over the process-lifetime store
    appointments: AppointmentService,

    /// Metrics collector for monitoring and health checks
    metrics: Arc<MetricsCollector>,

    /// Startup instants for uptime reporting
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl AppState {
    /// Initialize the application with a fresh in-memory store
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        Self::with_store(config, Arc::new(InMemoryAppointmentStore::new()))
    }

    /// Initialize the application around an existing store
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn AppointmentStore>,
    ) -> Result<Self, ServiceError> {
        validate_config(&config).map_err(|e| ServiceError::Configuration {
            message: e.to_string(),
        })?;

        let metrics = Arc::new(MetricsCollector::new().map_err(|e| {
            ServiceError::Initialization {
                message: format!("Failed to create metrics collector: {}", e),
            }
        })?);

        info!("Initializing {} service state", config.service.name);

        Ok(Self {
            config: Arc::new(config),
            appointments: AppointmentService::new(store, metrics.clone()),
            metrics,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        })
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the appointment operations
    pub fn appointments(&self) -> &AppointmentService {
        &self.appointments
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Wall-clock start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at_utc
    }
}
