//! Search endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderValue,
    routing::get,
    Router,
};
use serde::Serialize;

use codex_db::{SearchHit, SearchRepo};

use super::{cached, Cached};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{build_tsquery, SearchParams};

/// Short-lived regardless of environment
const SEARCH_CACHE_CONTROL: &str = "public, max-age=60";

/// One search hit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub name: String,
    pub image_url: Option<String>,
    pub card_type_code: Option<String>,
    pub pack_name: Option<String>,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        Self {
            kind: hit.kind,
            code: hit.code,
            name: hit.name,
            image_url: hit.image_url,
            card_type_code: hit.card_type_code,
            pack_name: hit.pack_name,
        }
    }
}

/// GET /api/search?q=&limit= - full-text search across the catalog
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Cached<Vec<SearchResult>>, ApiError> {
    let text = params.query()?;
    let limit = params.limit();

    let hits = match build_tsquery(text) {
        Some(tsquery) => {
            tracing::debug!(%tsquery, limit = limit.get(), "search");
            SearchRepo::new(&state.pool).search(&tsquery, limit.get()).await?
        }
        None => Vec::new(),
    };

    Ok(cached(
        HeaderValue::from_static(SEARCH_CACHE_CONTROL),
        hits.into_iter().map(SearchResult::from).collect(),
    ))
}

/// Search routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/search", get(search))
}
