//! codex-server: read-only JSON API over the card catalog
//!
//! Six fixed GET routes under `/api` plus `/health`. Handlers call the
//! typed queries in `codex-db`, shape rows into camelCase JSON, and attach
//! CORS and cache headers.

pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, CachePolicy, ServerConfig};
