//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the appointment service using
//! Prometheus metrics registered on a per-collector registry.

use crate::types::AppointmentStatus;
use anyhow::Result;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the appointment service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// Appointment-related metrics
    appointment_metrics: AppointmentMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// Health check status (0=unhealthy, 1=healthy)
    pub health_status: IntGauge,
}

/// Appointment-related metrics
#[derive(Clone)]
pub struct AppointmentMetrics {
    /// Total appointments created
    pub appointments_created_total: IntCounter,

    /// Status update attempts by outcome
    pub status_updates_total: IntCounterVec,

    /// Appointments currently held in the store
    pub appointments_stored: IntGauge,

    /// Duration of appointment operations
    pub operation_duration: HistogramVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let appointment_metrics = AppointmentMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            appointment_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get service metrics
    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    /// Get appointment metrics
    pub fn appointments(&self) -> &AppointmentMetrics {
        &self.appointment_metrics
    }

    /// Record an appointment being created
    pub fn record_appointment_created(&self, stored: usize) {
        self.appointment_metrics.appointments_created_total.inc();
        self.appointment_metrics
            .appointments_stored
            .set(stored as i64);
    }

    /// Record a successful status update
    pub fn record_status_updated(&self, status: AppointmentStatus) {
        self.appointment_metrics
            .status_updates_total
            .with_label_values(&[status.as_str()])
            .inc();
    }

    /// Record a rejected status update (`not_found`, `invalid_status`, `internal`)
    pub fn record_status_update_failed(&self, outcome: &str) {
        self.appointment_metrics
            .status_updates_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Record how long an appointment operation took
    pub fn record_operation(&self, operation: &str, duration: Duration) {
        self.appointment_metrics
            .operation_duration
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());
    }

    /// Update health status
    pub fn update_health_status(&self, healthy: bool) {
        self.service_metrics
            .health_status
            .set(if healthy { 1 } else { 0 });
    }

    /// Update service uptime
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds =
            IntGauge::new("klinik_api_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let health_status = IntGauge::new(
            "klinik_api_health_status",
            "Health status (0=unhealthy, 1=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            uptime_seconds,
            health_status,
        })
    }
}

impl AppointmentMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let appointments_created_total = IntCounter::new(
            "klinik_api_appointments_created_total",
            "Total appointments created",
        )?;
        registry.register(Box::new(appointments_created_total.clone()))?;

        let status_updates_total = IntCounterVec::new(
            Opts::new(
                "klinik_api_status_updates_total",
                "Total appointment status updates by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(status_updates_total.clone()))?;

        let appointments_stored = IntGauge::new(
            "klinik_api_appointments_stored",
            "Number of appointments held in memory",
        )?;
        registry.register(Box::new(appointments_stored.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "klinik_api_operation_duration_seconds",
                "Appointment operation duration",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self {
            appointments_created_total,
            status_updates_total,
            appointments_stored,
            operation_duration,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
