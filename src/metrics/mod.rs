//! Metrics and monitoring for the appointment service
//!
//! Prometheus counters and gauges for appointment operations, exposed over
//! HTTP by the `/metrics` route.

pub mod collector;

pub use collector::{AppointmentMetrics, MetricsCollector, MetricsTimer, ServiceMetrics};

use anyhow::Result;
use prometheus::{Encoder, TextEncoder};

/// Render every metric of `collector` in the Prometheus text format
pub fn encode_metrics(collector: &MetricsCollector) -> Result<String> {
    let metric_families = collector.registry().gather();
    let encoder = TextEncoder::new();

    encoder
        .encode_to_string(&metric_families)
        .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {}", e))
}

/// Content type of [`encode_metrics`] output
pub fn metrics_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
