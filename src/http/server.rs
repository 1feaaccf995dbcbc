//! HTTP server for the appointment API
//!
//! Binds the configured address and serves the axum router until a stop
//! signal is sent.

use crate::config::AppConfig;
use crate::http::docs::swagger_ui;
use crate::http::handlers::{
    create_appointment_handler, health_handler, list_appointments_handler, metrics_handler,
    root_handler, update_appointment_status_handler,
};
use crate::service::AppState;
use anyhow::{Context, Result};
use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl ApiServerConfig {
    /// `host:port`, with `host` either an IP address or a resolvable name
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<&AppConfig> for ApiServerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            port: config.server.port,
            host: config.server.host.clone(),
        }
    }
}

/// Build the router with every route bound to `state`.
///
/// Any origin may call the API; the permissive CORS layer also answers
/// preflight requests.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route(
            "/appointments",
            get(list_appointments_handler).post(create_appointment_handler),
        )
        .route("/appointments/{id}", put(update_appointment_status_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .merge(swagger_ui())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server exposing the appointment routes
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, state: AppState) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            state,
            shutdown_tx,
        }
    }

    /// Bind the configured address, resolving host names such as `localhost`
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.bind_address();

        TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("Failed to bind to {}", addr))
    }

    /// Bind the configured address and serve until stopped
    pub async fn start(&self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until stopped
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let app = create_router(self.state.clone());
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        info!("API server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API server shutdown signal received");
            })
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Stop the server
    pub fn stop(&self) {
        info!("Stopping API server...");

        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to API server: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::docs::{OPENAPI_PATH, SWAGGER_UI_PATH};
    use crate::http::handlers::ROOT_MESSAGE;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        AppState::new(AppConfig::default()).expect("Failed to create state")
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let state = create_test_state();
        state
            .appointments()
            .create(serde_json::Map::new())
            .unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("text/plain"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("klinik_api_appointments_created_total 1"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(OPENAPI_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_swagger_ui_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("{}/", SWAGGER_UI_PATH))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("text/html"));
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let app = create_router(create_test_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/appointments")
                    .header("origin", "http://frontend.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );

        let preflight = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/appointments/1")
                    .header("origin", "http://frontend.example")
                    .header("access-control-request-method", "PUT")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(preflight.status().is_success());
        assert_eq!(
            preflight.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert!(preflight
            .headers()
            .contains_key("access-control-allow-methods"));
    }

    #[tokio::test]
    async fn test_404_handling() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_server_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");

        let mut app_config = AppConfig::default();
        app_config.server.host = "127.0.0.1".to_string();
        app_config.server.port = 9090;

        let custom_config = ApiServerConfig::from(&app_config);
        assert_eq!(custom_config.port, 9090);
        assert_eq!(custom_config.host, "127.0.0.1");
        assert_eq!(custom_config.bind_address(), "127.0.0.1:9090");
    }

    #[tokio::test]
    async fn test_bind_resolves_host_name() {
        let server = ApiServer::new(
            ApiServerConfig {
                port: 0,
                host: "localhost".to_string(),
            },
            create_test_state(),
        );

        let listener = server.bind().await.expect("localhost should resolve");
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_serve_and_stop() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = Arc::new(ApiServer::new(
            ApiServerConfig::default(),
            create_test_state(),
        ));
        let handle = {
            let server = server.clone();
            tokio::spawn(async move { server.serve(listener).await })
        };

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with(ROOT_MESSAGE));

        server.stop();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
