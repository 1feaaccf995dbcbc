//! Service layer for the klinik-api service
//!
//! This module contains the appointment operations, the application state
//! shared with the HTTP layer, and health reporting.

pub mod app;
pub mod appointments;
pub mod health;

pub use app::{AppState, ServiceError};
pub use appointments::AppointmentService;
pub use health::{HealthCheck, HealthStatus};
