//! HTTP request handlers
//!
//! Each handler extracts the request data, calls the matching appointment
//! operation on the shared [`AppState`], and renders the result as JSON.

use crate::error::AppointmentError;
use crate::http::extract::ObjectBody;
use crate::metrics::{encode_metrics, metrics_content_type};
use crate::service::{AppState, HealthCheck};
use crate::types::{Appointment, StatusUpdateRequest};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

/// Plain-text liveness message served on `/`
pub const ROOT_MESSAGE: &str = "Klinik API is running";

/// Message returned for both unknown appointments and invalid target statuses
pub const NOT_FOUND_OR_INVALID_STATUS: &str = "Appointment not found or invalid status";

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Appointment not found or invalid status")]
    pub error: String,
}

/// Documented shape of a creation request. Any other keys are stored as sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ana")]
    pub patient_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 2)]
    pub doctor_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = Date, example = "2024-05-01")]
    pub appointment_date: Option<String>,
}

impl IntoResponse for AppointmentError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppointmentError::NotFound { .. } | AppointmentError::InvalidStatus { .. } => {
                (StatusCode::NOT_FOUND, NOT_FOUND_OR_INVALID_STATUS)
            }
            AppointmentError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Check that the API is up
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "API is running", body = String)
    )
)]
pub async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

/// Create a new appointment
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse)
    )
)]
pub async fn create_appointment_handler(
    State(state): State<AppState>,
    ObjectBody(fields): ObjectBody,
) -> Result<(StatusCode, Json<Appointment>), AppointmentError> {
    let appointment = state.appointments().create(fields)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// List every appointment in creation order
#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    responses(
        (status = 200, description = "All appointments", body = [Appointment])
    )
)]
pub async fn list_appointments_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, AppointmentError> {
    Ok(Json(state.appointments().list()?))
}

/// Approve or reject an appointment
#[utoipa::path(
    put,
    path = "/appointments/{id}",
    tag = "appointments",
    params(
        ("id" = u64, Path, description = "Appointment id")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = Appointment),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 404, description = "Appointment not found or invalid status", body = ErrorResponse)
    )
)]
pub async fn update_appointment_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ObjectBody(body): ObjectBody,
) -> Result<Json<Appointment>, AppointmentError> {
    // A missing body or one without `status` falls through as an invalid status
    let appointment = state.appointments().update_status(&id, body.get("status"))?;
    Ok(Json(appointment))
}

/// Health report
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");

    let health = HealthCheck::check(&state);
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(health))
}

/// Prometheus metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    debug!("Metrics endpoint requested");

    let metrics = state.metrics();
    metrics.update_uptime(state.uptime());

    match encode_metrics(&metrics) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, metrics_content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics".to_string(),
            )
                .into_response()
        }
    }
}
