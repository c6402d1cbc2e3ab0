//! Campaign endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;

use codex_db::{Campaign, CampaignRepo, CampaignScenario};

use super::{cached, Cached};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Campaign in the list view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListItem {
    pub campaign_code: String,
    pub campaign_name: String,
    pub image_url: Option<String>,
}

impl From<Campaign> for CampaignListItem {
    fn from(c: Campaign) -> Self {
        Self {
            campaign_code: c.campaign_code,
            campaign_name: c.campaign_name,
            image_url: c.image_url,
        }
    }
}

/// Campaign detail with its ordered scenarios
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub campaign_code: String,
    pub campaign_name: String,
    pub image_url: Option<String>,
    pub scenarios: Vec<CampaignScenarioResponse>,
}

impl CampaignResponse {
    fn new(campaign: Campaign, scenarios: Vec<CampaignScenario>) -> Self {
        Self {
            campaign_code: campaign.campaign_code,
            campaign_name: campaign.campaign_name,
            image_url: campaign.image_url,
            scenarios: scenarios.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignScenarioResponse {
    pub scenario_code: String,
    pub scenario_name: String,
    pub scenario_prefix: Option<String>,
    pub position: i32,
    pub image_url: Option<String>,
}

impl From<CampaignScenario> for CampaignScenarioResponse {
    fn from(s: CampaignScenario) -> Self {
        Self {
            scenario_code: s.scenario_code,
            scenario_name: s.scenario_name,
            scenario_prefix: s.scenario_prefix,
            position: s.position,
            image_url: s.image_url,
        }
    }
}

/// GET /api/campaigns - every campaign
async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Cached<Vec<CampaignListItem>>, ApiError> {
    let campaigns = CampaignRepo::new(&state.pool).list().await?;

    Ok(cached(
        state.cache_control.clone(),
        campaigns.into_iter().map(CampaignListItem::from).collect(),
    ))
}

/// GET /api/campaigns/{code} - one campaign with its scenarios
async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Cached<CampaignResponse>, ApiError> {
    let repo = CampaignRepo::new(&state.pool);
    let campaign = repo.get(&code).await?;
    let scenarios = repo.scenarios(&code).await?;

    Ok(cached(
        state.cache_control.clone(),
        CampaignResponse::new(campaign, scenarios),
    ))
}

/// Campaign routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/campaigns", get(list_campaigns))
        .route("/api/campaigns/{code}", get(get_campaign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn campaign() -> Campaign {
        Campaign {
            campaign_code: "dwl".into(),
            campaign_name: "The Dunwich Legacy".into(),
            image_url: None,
        }
    }

    #[test]
    fn campaign_without_scenarios_has_empty_list() {
        let body = serde_json::to_value(CampaignResponse::new(campaign(), Vec::new())).unwrap();
        assert_eq!(
            body,
            json!({
                "campaignCode": "dwl",
                "campaignName": "The Dunwich Legacy",
                "imageUrl": null,
                "scenarios": []
            })
        );
    }

    #[test]
    fn scenarios_keep_query_order() {
        let scenarios = ["extracurricular_activity", "the_house_always_wins"]
            .into_iter()
            .enumerate()
            .map(|(i, code)| CampaignScenario {
                scenario_code: code.into(),
                scenario_name: code.replace('_', " "),
                scenario_prefix: Some(format!("{}A", i + 1)),
                position: i as i32 + 1,
                image_url: Some(format!("https://arkhamdb.com/{}.png", code)),
            })
            .collect();

        let response = CampaignResponse::new(campaign(), scenarios);
        let positions: Vec<i32> = response.scenarios.iter().map(|s| s.position).collect();
        assert_eq!(positions, [1, 2]);

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["scenarios"][1]["scenarioCode"], "the_house_always_wins");
        assert_eq!(body["scenarios"][0]["scenarioPrefix"], "1A");
    }
}
