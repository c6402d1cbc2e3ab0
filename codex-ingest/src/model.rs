//! Input document shapes

use serde::Deserialize;

/// One record of the ArkhamDB card dump. Only the columns the catalog
/// stores are read; the whole record is kept separately as `raw_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArkhamCard {
    pub code: String,
    pub name: String,
    pub real_name: Option<String>,
    pub type_code: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub faction_code: String,
    #[serde(default)]
    pub faction_name: String,
    pub encounter_code: Option<String>,
    pub encounter_name: Option<String>,
    pub encounter_position: Option<i32>,
    pub position: Option<i32>,
    pub text: Option<String>,
    pub back_text: Option<String>,
    pub flavor: Option<String>,
    pub traits: Option<String>,
    #[serde(default)]
    pub url: String,
    pub imagesrc: Option<String>,
    pub backimagesrc: Option<String>,
    pub back_flavor: Option<String>,
    pub pack_code: Option<String>,
    pub pack_name: Option<String>,
    pub quantity: Option<i32>,
}

impl ArkhamCard {
    pub fn trait_list(&self) -> Vec<String> {
        self.traits.as_deref().map(parse_traits).unwrap_or_default()
    }

    /// Pack display name, falling back to the pack code
    pub fn pack_name(&self) -> Option<&str> {
        self.pack_name.as_deref().or(self.pack_code.as_deref())
    }
}

/// Split a period-delimited trait string ("Humanoid. Cultist.").
pub fn parse_traits(raw: &str) -> Vec<String> {
    raw.split('.')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDocument {
    pub campaign_code: String,
    pub campaign_name: String,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDocument {
    pub scenario_code: String,
    pub scenario_name: String,
    pub scenario_prefix: Option<String>,
    /// Encounter sets in play order; the first is the scenario's own set
    #[serde(default)]
    pub encounter_codes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn traits_split_on_periods() {
        assert_eq!(parse_traits("Humanoid. Cultist."), ["Humanoid", "Cultist"]);
        assert_eq!(parse_traits("Item. Tool. Melee"), ["Item", "Tool", "Melee"]);
        assert!(parse_traits("").is_empty());
        assert!(parse_traits(" . . ").is_empty());
    }

    #[test]
    fn missing_traits_give_empty_list() {
        let card: ArkhamCard = serde_json::from_value(json!({
            "code": "01030",
            "name": "Magnifying Glass",
            "type_code": "asset",
            "type_name": "Asset",
            "faction_code": "seeker",
            "faction_name": "Seeker",
            "url": "https://arkhamdb.com/card/01030",
            "pack_code": "core"
        }))
        .unwrap();

        assert!(card.trait_list().is_empty());
        assert_eq!(card.pack_name(), Some("core"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let card: ArkhamCard = serde_json::from_value(json!({
            "code": "01116",
            "name": "Ghoul Priest",
            "type_code": "enemy",
            "type_name": "Enemy",
            "faction_code": "mythos",
            "faction_name": "Mythos",
            "url": "https://arkhamdb.com/card/01116",
            "traits": "Humanoid. Monster. Ghoul. Elite.",
            "pack_code": "core",
            "pack_name": "Core Set",
            "health": 5,
            "victory": 2
        }))
        .unwrap();

        assert_eq!(card.trait_list().len(), 4);
        assert_eq!(card.pack_name(), Some("Core Set"));
    }

    #[test]
    fn incomplete_descriptive_fields_default_to_empty() {
        let card: ArkhamCard = serde_json::from_value(json!({
            "code": "02100",
            "name": "Unfinished Record",
            "type_code": "treachery",
            "pack_code": "dwl"
        }))
        .unwrap();

        assert_eq!(card.type_name, "");
        assert_eq!(card.faction_code, "");
        assert_eq!(card.faction_name, "");
        assert_eq!(card.url, "");
    }

    #[test]
    fn campaign_document_defaults() {
        let doc: Vec<CampaignDocument> = serde_json::from_value(json!([{
            "campaignCode": "core",
            "campaignName": "Night of the Zealot",
            "scenarios": [{
                "scenarioCode": "the_gathering",
                "scenarioName": "The Gathering"
            }]
        }]))
        .unwrap();

        let scenario = &doc[0].scenarios[0];
        assert!(scenario.scenario_prefix.is_none());
        assert!(scenario.encounter_codes.is_empty());
    }
}
