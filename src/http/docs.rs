//! OpenAPI document for the appointment routes

use crate::http::handlers::{self, CreateAppointmentRequest, ErrorResponse};
use crate::types::{Appointment, AppointmentStatus, StatusUpdateRequest};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path the OpenAPI document is served on
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Path of the interactive Swagger UI
pub const SWAGGER_UI_PATH: &str = "/api-docs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Klinik Appointment API",
        description = "Create clinic appointments and approve or reject them"
    ),
    paths(
        handlers::root_handler,
        handlers::create_appointment_handler,
        handlers::list_appointments_handler,
        handlers::update_appointment_status_handler
    ),
    components(schemas(
        Appointment,
        AppointmentStatus,
        CreateAppointmentRequest,
        StatusUpdateRequest,
        ErrorResponse
    )),
    tags(
        (name = "system", description = "Service status"),
        (name = "appointments", description = "Appointment requests and approvals")
    )
)]
pub struct ApiDoc;

/// Swagger UI at [`SWAGGER_UI_PATH`], backed by the document at [`OPENAPI_PATH`]
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}
