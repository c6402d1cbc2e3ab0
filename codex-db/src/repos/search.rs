//! Full-text search over the unified search view
//!
//! Matching and ranking are delegated to Postgres (`@@` / `ts_rank`).

use sqlx::{FromRow, PgPool};

use super::DbError;

/// One search result
#[derive(Debug, Clone, FromRow)]
pub struct SearchHit {
    #[sqlx(rename = "type")]
    pub kind: String,
    pub code: String,
    pub name: String,
    pub image_url: Option<String>,
    pub card_type_code: Option<String>,
    pub pack_name: Option<String>,
}

/// Search repository
pub struct SearchRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SearchRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Run a tsquery expression (e.g. `ghoul & priest`), best match first.
    pub async fn search(&self, tsquery: &str, limit: u32) -> Result<Vec<SearchHit>, DbError> {
        let rows = sqlx::query_as::<_, SearchHit>(
            r#"
            SELECT type, code, name, image_url, card_type_code, pack_name
            FROM search_view
            WHERE full_text_search @@ to_tsquery('english', $1)
            ORDER BY ts_rank(full_text_search, to_tsquery('english', $1)) DESC, name, code
            LIMIT $2
            "#,
        )
        .bind(tsquery)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
