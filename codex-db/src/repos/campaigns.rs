//! Campaign queries

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Campaign with its representative image
#[derive(Debug, Clone, FromRow)]
pub struct Campaign {
    pub campaign_code: String,
    pub campaign_name: String,
    pub image_url: Option<String>,
}

/// Scenario as listed under its campaign
#[derive(Debug, Clone, FromRow)]
pub struct CampaignScenario {
    pub scenario_code: String,
    pub scenario_name: String,
    pub scenario_prefix: Option<String>,
    pub position: i32,
    pub image_url: Option<String>,
}

/// Campaign repository
pub struct CampaignRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CampaignRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All campaigns in catalog order.
    pub async fn list(&self) -> Result<Vec<Campaign>, DbError> {
        let rows = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT campaign_code, campaign_name, image_url
            FROM campaign_view
            ORDER BY position, campaign_code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Single campaign by code.
    pub async fn get(&self, code: &str) -> Result<Campaign, DbError> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT campaign_code, campaign_name, image_url
            FROM campaign_view
            WHERE campaign_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("campaign", code))
    }

    /// Scenarios of a campaign, ordered by their position.
    pub async fn scenarios(&self, code: &str) -> Result<Vec<CampaignScenario>, DbError> {
        let rows = sqlx::query_as::<_, CampaignScenario>(
            r#"
            SELECT scenario_code, scenario_name, scenario_prefix, position, image_url
            FROM scenario_view
            WHERE campaign_code = $1
            ORDER BY position, scenario_code
            "#,
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
