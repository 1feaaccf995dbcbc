//! Request body extraction
//!
//! Appointment routes read their body as a JSON object. A request without a
//! JSON content type, or with an empty body, is read as `{}`; only a JSON
//! body that fails to parse (or is not an object) is rejected.

use crate::http::handlers::ErrorResponse;
use crate::types::AppointmentFields;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Reasons a JSON body is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyRejection {
    #[error("Malformed JSON body: {message}")]
    MalformedJson { message: String },

    #[error("JSON body must be an object")]
    NotAnObject,
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Request body read as a JSON object, `{}` when absent
#[derive(Debug, Clone, Default)]
pub struct ObjectBody(pub AppointmentFields);

impl<S> FromRequest<S> for ObjectBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_object_body(is_json, &bytes)
            .map(ObjectBody)
            .map_err(IntoResponse::into_response)
    }
}

/// Whether the `content-type` header names JSON (`application/json` or `application/*+json`)
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Read `bytes` as a JSON object.
///
/// Non-JSON content and blank bodies yield an empty object.
pub fn parse_object_body(
    is_json: bool,
    bytes: &[u8],
) -> Result<AppointmentFields, BodyRejection> {
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        debug!("Request carries no JSON body, reading it as an empty object");
        return Ok(AppointmentFields::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(BodyRejection::NotAnObject),
        Err(e) => Err(BodyRejection::MalformedJson {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(has_json_content_type(&headers_with("application/json")));
        assert!(has_json_content_type(&headers_with("application/json; charset=utf-8")));
        assert!(has_json_content_type(&headers_with("Application/JSON")));
        assert!(has_json_content_type(&headers_with("application/merge-patch+json")));

        assert!(!has_json_content_type(&headers_with("text/plain")));
        assert!(!has_json_content_type(&headers_with(
            "application/x-www-form-urlencoded"
        )));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_missing_or_foreign_body_is_empty_object() {
        assert_eq!(parse_object_body(false, b"").unwrap(), AppointmentFields::new());
        assert_eq!(
            parse_object_body(false, b"status=approved").unwrap(),
            AppointmentFields::new()
        );
        assert_eq!(parse_object_body(true, b"").unwrap(), AppointmentFields::new());
        assert_eq!(parse_object_body(true, b"  \n").unwrap(), AppointmentFields::new());
    }

    #[test]
    fn test_json_object_body() {
        let fields = parse_object_body(true, br#"{"status": "approved"}"#).unwrap();
        assert_eq!(fields.get("status"), Some(&Value::from("approved")));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            parse_object_body(true, b"{not json"),
            Err(BodyRejection::MalformedJson { .. })
        ));
        assert_eq!(
            parse_object_body(true, b"[1, 2]"),
            Err(BodyRejection::NotAnObject)
        );
        assert_eq!(
            parse_object_body(true, b"\"approved\""),
            Err(BodyRejection::NotAnObject)
        );
    }
}
