//! Card endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;

use codex_db::{Card, CardRepo, RelatedScenario};

use super::{cached, Cached};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Scenario that uses an encounter set, with its campaign when it has one
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedScenarioResponse {
    pub scenario_code: String,
    pub scenario_name: String,
    pub campaign_code: Option<String>,
    pub campaign_name: Option<String>,
}

impl From<RelatedScenario> for RelatedScenarioResponse {
    fn from(s: RelatedScenario) -> Self {
        Self {
            scenario_code: s.scenario_code,
            scenario_name: s.scenario_name,
            campaign_code: s.campaign_code,
            campaign_name: s.campaign_name,
        }
    }
}

/// Full card record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
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
    pub back_flavor: Option<String>,
    pub traits: Vec<String>,
    pub url: String,
    pub image_src: Option<String>,
    pub back_image_src: Option<String>,
    pub pack_code: String,
    pub pack_name: String,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
    pub scenarios: Vec<RelatedScenarioResponse>,
}

impl CardResponse {
    fn new(card: Card, scenarios: Vec<RelatedScenario>) -> Self {
        Self {
            card_code: card.card_code,
            card_name: card.card_name,
            real_name: card.real_name,
            type_code: card.type_code,
            type_name: card.type_name,
            faction_code: card.faction_code,
            faction_name: card.faction_name,
            encounter_code: card.encounter_code,
            encounter_name: card.encounter_name,
            encounter_position: card.encounter_position,
            position: card.position,
            text: card.text,
            back_text: card.back_text,
            flavor: card.flavor,
            back_flavor: card.back_flavor,
            traits: card.traits,
            url: card.url,
            image_src: card.imagesrc,
            back_image_src: card.backimagesrc,
            pack_code: card.pack_code,
            pack_name: card.pack_name,
            quantity: card.quantity,
            image_url: card.image_url,
            scenarios: scenarios.into_iter().map(Into::into).collect(),
        }
    }
}

/// GET /api/cards/{code}
///
/// Player cards carry no encounter set and therefore no scenarios.
async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Cached<CardResponse>, ApiError> {
    let repo = CardRepo::new(&state.pool);
    let card = repo.get(&code).await?;

    let scenarios = match card.encounter_code.as_deref() {
        Some(encounter_code) => repo.scenarios(encounter_code).await?,
        None => Vec::new(),
    };

    Ok(cached(
        state.cache_control.clone(),
        CardResponse::new(card, scenarios),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/cards/{code}", get(get_card))
}
