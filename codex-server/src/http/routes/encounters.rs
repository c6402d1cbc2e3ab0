//! Encounter set endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;

use codex_db::{EncounterSet, EncounterSetCard, EncounterSetRepo, RelatedScenario};

use super::cards::RelatedScenarioResponse;
use super::{cached, Cached};
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSetResponse {
    pub encounter_code: String,
    pub encounter_name: String,
    pub image_url: Option<String>,
    pub scenarios: Vec<RelatedScenarioResponse>,
    pub cards: Vec<EncounterCardResponse>,
}

impl EncounterSetResponse {
    fn new(set: EncounterSet, scenarios: Vec<RelatedScenario>, cards: Vec<EncounterSetCard>) -> Self {
        Self {
            encounter_code: set.encounter_code,
            encounter_name: set.encounter_name,
            image_url: set.image_url,
            scenarios: scenarios.into_iter().map(Into::into).collect(),
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterCardResponse {
    pub card_code: String,
    pub card_name: String,
    pub type_code: String,
    pub type_name: String,
    pub traits: Vec<String>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

impl From<EncounterSetCard> for EncounterCardResponse {
    fn from(c: EncounterSetCard) -> Self {
        Self {
            card_code: c.card_code,
            card_name: c.card_name,
            type_code: c.type_code,
            type_name: c.type_name,
            traits: c.traits,
            quantity: c.quantity,
            image_url: c.image_url,
        }
    }
}

/// GET /api/encounters/{code}
async fn get_encounter_set(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Cached<EncounterSetResponse>, ApiError> {
    let repo = EncounterSetRepo::new(&state.pool);
    let set = repo.get(&code).await?;
    let scenarios = repo.scenarios(&code).await?;
    let cards = repo.cards(&code).await?;

    Ok(cached(
        state.cache_control.clone(),
        EncounterSetResponse::new(set, scenarios, cards),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/encounters/{code}", get(get_encounter_set))
}
