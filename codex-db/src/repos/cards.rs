//! Card queries

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Full card record (everything except the raw source document)
#[derive(Debug, Clone, FromRow)]
pub struct Card {
    pub card_code: String,
    pub card_name: String,
    pub real_name: Option<String>,
    pub type_code: String,
    pub type_name: String,
    pub faction_code: String,
    pub faction_name: String,
    pub encounter_code: Option<String>,
    pub encounter_name: Option<String>,
    pub encounter_position: Option<i32>,
    pub position: Option<i32>,
    pub text: Option<String>,
    pub back_text: Option<String>,
    pub flavor: Option<String>,
    pub traits: Vec<String>,
    pub url: String,
    pub imagesrc: Option<String>,
    pub backimagesrc: Option<String>,
    pub back_flavor: Option<String>,
    pub pack_code: String,
    pub pack_name: String,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

/// Scenario reached through an encounter set, with its campaign
#[derive(Debug, Clone, FromRow)]
pub struct RelatedScenario {
    pub scenario_code: String,
    pub scenario_name: String,
    pub campaign_code: Option<String>,
    pub campaign_name: Option<String>,
}

/// Card repository
pub struct CardRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CardRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Single card by code.
    pub async fn get(&self, code: &str) -> Result<Card, DbError> {
        sqlx::query_as::<_, Card>(
            r#"
            SELECT
                card_code,
                card_name,
                real_name,
                type_code,
                type_name,
                faction_code,
                faction_name,
                encounter_code,
                encounter_name,
                encounter_position,
                position,
                text,
                back_text,
                flavor,
                traits,
                url,
                imagesrc,
                backimagesrc,
                back_flavor,
                pack_code,
                pack_name,
                quantity,
                image_url
            FROM card
            WHERE card_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("card", code))
    }

    /// Scenarios in which the card's encounter set appears.
    pub async fn scenarios(&self, encounter_code: &str) -> Result<Vec<RelatedScenario>, DbError> {
        let rows = sqlx::query_as::<_, RelatedScenario>(
            r#"
            SELECT s.scenario_code, s.scenario_name, s.campaign_code, ca.campaign_name
            FROM encounter_set_scenario ess
            JOIN scenario s ON s.scenario_code = ess.scenario_code
            LEFT JOIN campaign ca ON ca.campaign_code = s.campaign_code
            WHERE ess.encounter_code = $1
            ORDER BY ca.position NULLS LAST, s.position, s.scenario_code
            "#,
        )
        .bind(encounter_code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
