//! Klinik API - in-memory clinic appointment service
//!
//! This crate provides an HTTP service for creating clinic appointments,
//! listing them, and approving or rejecting them. All state lives in memory
//! for the lifetime of the process.

pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types and traits
pub use error::{AppointmentError, AppointmentResult, Result};
pub use types::*;

// Re-export key components
pub use http::{create_router, ApiServer};
pub use service::{AppState, AppointmentService};
pub use store::{AppointmentStore, InMemoryAppointmentStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
