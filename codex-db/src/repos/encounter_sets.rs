//! Encounter set queries

use sqlx::{FromRow, PgPool};

use super::cards::RelatedScenario;
use super::DbError;

/// Encounter set header row
#[derive(Debug, Clone, FromRow)]
pub struct EncounterSet {
    pub encounter_code: String,
    pub encounter_name: String,
    pub image_url: Option<String>,
}

/// Card belonging to an encounter set
#[derive(Debug, Clone, FromRow)]
pub struct EncounterSetCard {
    pub card_code: String,
    pub card_name: String,
    pub type_code: String,
    pub type_name: String,
    pub traits: Vec<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

/// Encounter set repository
pub struct EncounterSetRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EncounterSetRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Single encounter set by code.
    pub async fn get(&self, code: &str) -> Result<EncounterSet, DbError> {
        sqlx::query_as::<_, EncounterSet>(
            r#"
            SELECT encounter_code, encounter_name, image_url
            FROM encounter_set_view
            WHERE encounter_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("encounter set", code))
    }

    /// Scenarios that use the encounter set.
    pub async fn scenarios(&self, code: &str) -> Result<Vec<RelatedScenario>, DbError> {
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
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Cards of the set in encounter position order.
    pub async fn cards(&self, code: &str) -> Result<Vec<EncounterSetCard>, DbError> {
        let rows = sqlx::query_as::<_, EncounterSetCard>(
            r#"
            SELECT card_code, card_name, type_code, type_name, traits, quantity, image_url
            FROM card
            WHERE encounter_code = $1
            ORDER BY encounter_position NULLS LAST, card_code
            "#,
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
