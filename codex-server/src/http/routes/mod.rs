//! Route handlers organized by resource

pub mod campaigns;
pub mod cards;
pub mod encounters;
pub mod health;
pub mod scenarios;
pub mod search;

use axum::http::{header, HeaderName, HeaderValue};
use axum::Json;

use super::error::ApiError;

/// JSON body plus its Cache-Control header
pub type Cached<T> = ([(HeaderName, HeaderValue); 1], Json<T>);

pub(crate) fn cached<T>(cache_control: HeaderValue, body: T) -> Cached<T> {
    ([(header::CACHE_CONTROL, cache_control)], Json(body))
}

/// Anything outside the route table
pub(crate) async fn fallback() -> ApiError {
    ApiError::NotFound { resource: "route" }
}

/// Known path, unsupported method
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
