//! Error types for the appointment service
//!
//! Startup, configuration and server plumbing use anyhow; the appointment
//! operations report failures through [`AppointmentError`].

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Result type for store and appointment operations
pub type AppointmentResult<T> = std::result::Result<T, AppointmentError>;

/// Failures of the appointment operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {id}")]
    NotFound { id: String },

    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl AppointmentError {
    /// Label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            AppointmentError::NotFound { .. } => "not_found",
            AppointmentError::InvalidStatus { .. } => "invalid_status",
            AppointmentError::Internal { .. } => "internal",
        }
    }
}
