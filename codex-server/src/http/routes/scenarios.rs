//! Scenario endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;

use codex_db::{Scenario, ScenarioCard, ScenarioEncounterSet, ScenarioRepo};

use super::{cached, Cached};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Card types printed in landscape orientation
const HORIZONTAL_TYPES: [&str; 3] = ["act", "agenda", "investigator"];

pub fn is_horizontal(type_code: &str) -> bool {
    HORIZONTAL_TYPES.contains(&type_code)
}

/// Scenario detail
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    pub scenario_code: String,
    pub scenario_name: String,
    pub scenario_prefix: Option<String>,
    pub campaign_code: Option<String>,
    pub position: i32,
    pub image_url: Option<String>,
    pub encounter_sets: Vec<ScenarioEncounterResponse>,
    pub cards: Vec<ScenarioCardResponse>,
}

impl ScenarioResponse {
    fn new(
        scenario: Scenario,
        encounter_sets: Vec<ScenarioEncounterSet>,
        cards: Vec<ScenarioCard>,
    ) -> Self {
        Self {
            scenario_code: scenario.scenario_code,
            scenario_name: scenario.scenario_name,
            scenario_prefix: scenario.scenario_prefix,
            campaign_code: scenario.campaign_code,
            position: scenario.position,
            image_url: scenario.image_url,
            encounter_sets: encounter_sets.into_iter().map(Into::into).collect(),
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEncounterResponse {
    pub encounter_code: String,
    pub encounter_name: String,
    pub position: i32,
}

impl From<ScenarioEncounterSet> for ScenarioEncounterResponse {
    fn from(es: ScenarioEncounterSet) -> Self {
        Self {
            encounter_code: es.encounter_code,
            encounter_name: es.encounter_name,
            position: es.position,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCardResponse {
    pub card_code: String,
    pub card_name: String,
    pub type_code: String,
    pub type_name: String,
    pub encounter_code: Option<String>,
    pub traits: Vec<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
    pub is_horizontal: bool,
}

impl From<ScenarioCard> for ScenarioCardResponse {
    fn from(c: ScenarioCard) -> Self {
        Self {
            is_horizontal: is_horizontal(&c.type_code),
            card_code: c.card_code,
            card_name: c.card_name,
            type_code: c.type_code,
            type_name: c.type_name,
            encounter_code: c.encounter_code,
            traits: c.traits,
            quantity: c.quantity,
            image_url: c.image_url,
        }
    }
}

/// GET /api/scenarios/{code} - scenario with encounter sets and cards
async fn get_scenario(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Cached<ScenarioResponse>, ApiError> {
    let repo = ScenarioRepo::new(&state.pool);
    let scenario = repo.get(&code).await?;
    let encounter_sets = repo.encounter_sets(&code).await?;
    let cards = repo.cards(&code).await?;

    Ok(cached(
        state.cache_control.clone(),
        ScenarioResponse::new(scenario, encounter_sets, cards),
    ))
}

/// Scenario routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/scenarios/{code}", get(get_scenario))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario() -> Scenario {
        Scenario {
            scenario_code: "the_gathering".into(),
            scenario_name: "The Gathering".into(),
            scenario_prefix: None,
            campaign_code: None,
            position: 1,
            image_url: None,
        }
    }

    fn card(code: &str, type_code: &str) -> ScenarioCard {
        ScenarioCard {
            card_code: code.into(),
            card_name: code.into(),
            type_code: type_code.into(),
            type_name: type_code.into(),
            encounter_code: Some("the_gathering".into()),
            traits: Vec::new(),
            quantity: None,
            image_url: None,
        }
    }

    #[test]
    fn horizontal_types() {
        assert!(is_horizontal("act"));
        assert!(is_horizontal("agenda"));
        assert!(is_horizontal("investigator"));
        assert!(!is_horizontal("enemy"));
        assert!(!is_horizontal("treachery"));
    }

    #[test]
    fn empty_scenario_has_empty_lists() {
        let body = serde_json::to_value(ScenarioResponse::new(scenario(), vec![], vec![])).unwrap();
        assert_eq!(body["encounterSets"], json!([]));
        assert_eq!(body["cards"], json!([]));
        assert_eq!(body["campaignCode"], serde_json::Value::Null);
        assert_eq!(body["scenarioPrefix"], serde_json::Value::Null);
    }

    #[test]
    fn cards_carry_traits_and_orientation() {
        let sets = vec![
            ScenarioEncounterSet {
                encounter_code: "the_gathering".into(),
                encounter_name: "The Gathering".into(),
                position: 1,
            },
            ScenarioEncounterSet {
                encounter_code: "rats".into(),
                encounter_name: "Rats".into(),
                position: 2,
            },
        ];
        let mut priest = card("01116", "enemy");
        priest.traits = vec!["Humanoid".into(), "Monster".into(), "Ghoul".into()];
        let cards = vec![card("01105", "agenda"), priest];

        let body = serde_json::to_value(ScenarioResponse::new(scenario(), sets, cards)).unwrap();
        assert_eq!(body["encounterSets"][0]["position"], 1);
        assert_eq!(body["encounterSets"][1]["encounterCode"], "rats");
        assert_eq!(body["cards"][0]["isHorizontal"], true);
        assert_eq!(body["cards"][0]["traits"], json!([]));
        assert_eq!(body["cards"][1]["isHorizontal"], false);
        assert_eq!(body["cards"][1]["traits"], json!(["Humanoid", "Monster", "Ghoul"]));
        assert_eq!(body["cards"][1]["quantity"], serde_json::Value::Null);
    }
}
