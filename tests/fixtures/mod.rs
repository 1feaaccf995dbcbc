//! Test fixtures and mock implementations for integration testing
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use klinik_api::config::AppConfig;
use klinik_api::error::AppointmentResult;
use klinik_api::store::AppointmentStore;
use klinik_api::types::{Appointment, AppointmentFields, AppointmentId, AppointmentStatus};
use klinik_api::{create_router, AppState};
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

mock! {
    pub Store {}

    impl AppointmentStore for Store {
        fn create(&self, fields: AppointmentFields) -> AppointmentResult<Appointment>;
        fn list(&self) -> AppointmentResult<Vec<Appointment>>;
        fn find_by_id(&self, id: AppointmentId) -> AppointmentResult<Option<Appointment>>;
        fn update_status(
            &self,
            id: AppointmentId,
            status: AppointmentStatus,
        ) -> AppointmentResult<Appointment>;
        fn count(&self) -> AppointmentResult<usize>;
    }
}

/// Fresh state with its own empty in-memory store
pub fn create_test_state() -> AppState {
    AppState::new(AppConfig::default()).expect("Failed to create test state")
}

/// State wrapping a caller-provided store
pub fn create_state_with_store(store: impl AppointmentStore + 'static) -> AppState {
    AppState::with_store(AppConfig::default(), Arc::new(store))
        .expect("Failed to create test state")
}

/// Router over a fresh state
pub fn create_test_app() -> Router {
    create_router(create_test_state())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Request with an arbitrary (or no) content type and a raw body
pub fn raw_request(
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Send one request through a clone of `app`
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).unwrap()
}

/// POST a creation body and return the created record
pub async fn create_appointment(app: &Router, body: Value) -> Value {
    let response = send(app, json_request("POST", "/appointments", &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

/// PUT a status update and return the response
pub async fn update_status(app: &Router, id: &str, status: Value) -> Response {
    send(
        app,
        json_request(
            "PUT",
            &format!("/appointments/{}", id),
            &serde_json::json!({ "status": status }),
        ),
    )
    .await
}

/// GET the full list
pub async fn list_appointments(app: &Router) -> Vec<Value> {
    let response = send(app, get("/appointments")).await;
    assert_eq!(response.status(), StatusCode::OK);
    match read_json(response).await {
        Value::Array(items) => items,
        other => panic!("expected a JSON array, got {}", other),
    }
}
