//! HTTP layer
//!
//! Axum server with:
//! - Permissive CORS, OPTIONS answered with 204 without touching a handler
//! - Request tracing
//! - Static Cache-Control on every success response
//! - JSON error bodies (`{"error": "..."}`)
//! - Graceful shutdown

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, CachePolicy, ServerConfig};
