//! Scenario queries

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Scenario header row
#[derive(Debug, Clone, FromRow)]
pub struct Scenario {
    pub scenario_code: String,
    pub scenario_name: String,
    pub scenario_prefix: Option<String>,
    pub campaign_code: Option<String>,
    pub position: i32,
    pub image_url: Option<String>,
}

/// Encounter set linked to a scenario
#[derive(Debug, Clone, FromRow)]
pub struct ScenarioEncounterSet {
    pub encounter_code: String,
    pub encounter_name: String,
    pub position: i32,
}

/// Card drawn from one of a scenario's encounter sets
#[derive(Debug, Clone, FromRow)]
pub struct ScenarioCard {
    pub card_code: String,
    pub card_name: String,
    pub type_code: String,
    pub type_name: String,
    pub encounter_code: Option<String>,
    pub traits: Vec<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

/// Scenario repository
pub struct ScenarioRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ScenarioRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Single scenario by code.
    pub async fn get(&self, code: &str) -> Result<Scenario, DbError> {
        sqlx::query_as::<_, Scenario>(
            r#"
            SELECT scenario_code, scenario_name, scenario_prefix, campaign_code, position, image_url
            FROM scenario_view
            WHERE scenario_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("scenario", code))
    }

    /// Encounter sets of a scenario in link order.
    pub async fn encounter_sets(&self, code: &str) -> Result<Vec<ScenarioEncounterSet>, DbError> {
        let rows = sqlx::query_as::<_, ScenarioEncounterSet>(
            r#"
            SELECT es.encounter_code, es.encounter_name, ess.position
            FROM encounter_set_scenario ess
            JOIN encounter_set es ON es.encounter_code = ess.encounter_code
            WHERE ess.scenario_code = $1
            ORDER BY ess.position, es.encounter_code
            "#,
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Every card of every encounter set in the scenario.
    ///
    /// Grouped by encounter-set position, then by position inside the set.
    pub async fn cards(&self, code: &str) -> Result<Vec<ScenarioCard>, DbError> {
        let rows = sqlx::query_as::<_, ScenarioCard>(
            r#"
            SELECT
                c.card_code,
                c.card_name,
                c.type_code,
                c.type_name,
                c.encounter_code,
                c.traits,
                c.quantity,
                c.image_url
            FROM encounter_set_scenario ess
            JOIN card c ON c.encounter_code = ess.encounter_code
            WHERE ess.scenario_code = $1
            ORDER BY ess.position, c.encounter_position NULLS LAST, c.card_code
            "#,
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
