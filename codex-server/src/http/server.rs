//! Axum server setup
//!
//! Server skeleton with:
//! - CORS allowing any origin for GET/OPTIONS, preflight answered with 204
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::routes;

/// `max-age` for production deployments (one day)
pub const PRODUCTION_MAX_AGE: u32 = 86_400;

/// `max-age` while developing, so reseeded data shows up quickly
pub const DEVELOPMENT_MAX_AGE: u32 = 5;

/// Cache-Control policy applied to catalog responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age: u32,
}

impl CachePolicy {
    /// Pick the policy for a deployment environment name (`ENV`).
    pub fn for_environment(env: Option<&str>) -> Self {
        match env {
            Some(name) if name.eq_ignore_ascii_case("development") => Self {
                max_age: DEVELOPMENT_MAX_AGE,
            },
            _ => Self::default(),
        }
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("public, max-age={}", self.max_age))
            .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_age: PRODUCTION_MAX_AGE,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    pub cache: CachePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cache: CachePolicy::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Precomputed Cache-Control value for catalog routes
    pub cache_control: HeaderValue,
}

impl AppState {
    pub fn new(pool: PgPool, cache: CachePolicy) -> Self {
        Self {
            pool,
            cache_control: cache.header_value(),
        }
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::search::router())
        .merge(routes::campaigns::router())
        .merge(routes::scenarios::router())
        .merge(routes::encounters::router())
        .merge(routes::cards::router())
        .method_not_allowed_fallback(routes::method_not_allowed)
        .fallback(routes::fallback)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Rewrite CorsLayer's empty 200 preflight reply to 204.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        max_age = config.cache.max_age,
        "cache policy: public, max-age={}",
        config.cache.max_age
    );
    let app = build_router(AppState::new(pool, config.cache));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
