//! HTTP surface of the appointment service
//!
//! Routes, handlers, body extraction, the OpenAPI document and the listening
//! server.

pub mod docs;
pub mod extract;
pub mod handlers;
pub mod server;

pub use docs::ApiDoc;
pub use server::{create_router, ApiServer, ApiServerConfig};
