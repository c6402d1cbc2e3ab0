//! Load card and campaign documents into the catalog
//!
//! Each document is written in a single transaction: either every row of
//! it lands or none does. All writes are upserts keyed by natural code, so
//! seeding the same files twice leaves the catalog unchanged.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgConnection;
use tracing::{debug, info};

use codex_db::repos::writes::{
    link_encounter_set, upsert_campaign, upsert_card, upsert_encounter_set, upsert_scenario,
    CampaignUpsert, CardUpsert, EncounterSetUpsert, ScenarioUpsert,
};

use crate::error::IngestError;
use crate::model::{ArkhamCard, CampaignDocument};
use crate::SeedArgs;

/// Row counts written by a seed run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub cards: usize,
    pub skipped_cards: usize,
    pub encounter_sets: usize,
    pub campaigns: usize,
    pub scenarios: usize,
    pub encounter_links: usize,
}

/// A card record plus the verbatim JSON it came from
#[derive(Debug, Clone)]
pub struct CardRecord {
    pub card: ArkhamCard,
    pub raw: Value,
}

pub async fn run_seed(args: &SeedArgs) -> Result<SeedReport, IngestError> {
    let pool = codex_db::create_pool(&args.database_url).await?;
    codex_db::migrations::run(&pool).await?;

    let raw_cards: Vec<Value> = read_json(&args.cards).await?;
    let (records, skipped_cards) = parse_cards(raw_cards, &args.cards)?;
    let campaigns: Vec<CampaignDocument> = read_json(&args.campaigns).await?;

    let mut tx = pool.begin().await?;
    let mut report = seed_cards(&mut tx, &records).await?;
    tx.commit().await?;
    report.skipped_cards = skipped_cards;
    info!(
        cards = report.cards,
        skipped = report.skipped_cards,
        encounter_sets = report.encounter_sets,
        "seeded cards"
    );

    let mut tx = pool.begin().await?;
    let campaign_report = seed_campaigns(&mut tx, &campaigns).await?;
    tx.commit().await?;
    info!(
        campaigns = campaign_report.campaigns,
        scenarios = campaign_report.scenarios,
        links = campaign_report.encounter_links,
        "seeded campaigns"
    );

    report.campaigns = campaign_report.campaigns;
    report.scenarios = campaign_report.scenarios;
    report.encounter_links = campaign_report.encounter_links;
    Ok(report)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IngestError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode raw card values, dropping cards without a pack.
///
/// Returns the kept records and the number skipped.
pub fn parse_cards(raw: Vec<Value>, path: &Path) -> Result<(Vec<CardRecord>, usize), IngestError> {
    let total = raw.len();
    let mut records = Vec::with_capacity(total);

    for value in raw {
        let card = ArkhamCard::deserialize(&value).map_err(|source| IngestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if card.pack_code.is_none() {
            debug!(code = %card.code, "skipping card without pack");
            continue;
        }
        records.push(CardRecord { card, raw: value });
    }

    let skipped = total - records.len();
    Ok((records, skipped))
}

/// Distinct `(code, name)` encounter sets in first-seen order.
///
/// A set whose cards never carry a name is named after its code.
pub fn encounter_sets(records: &[CardRecord]) -> Vec<(&str, &str)> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| {
            let code = r.card.encounter_code.as_deref()?;
            let name = r.card.encounter_name.as_deref().unwrap_or(code);
            seen.insert(code).then_some((code, name))
        })
        .collect()
}

pub async fn seed_cards(
    conn: &mut PgConnection,
    records: &[CardRecord],
) -> Result<SeedReport, IngestError> {
    let sets = encounter_sets(records);
    for &(code, name) in &sets {
        upsert_encounter_set(&mut *conn, &EncounterSetUpsert { code, name }).await?;
    }

    for record in records {
        let card = &record.card;
        let Some(pack_code) = card.pack_code.as_deref() else {
            continue;
        };
        let traits = card.trait_list();

        upsert_card(
            &mut *conn,
            &CardUpsert {
                code: &card.code,
                name: &card.name,
                real_name: card.real_name.as_deref(),
                type_code: &card.type_code,
                type_name: &card.type_name,
                faction_code: &card.faction_code,
                faction_name: &card.faction_name,
                encounter_code: card.encounter_code.as_deref(),
                encounter_name: card.encounter_name.as_deref(),
                encounter_position: card.encounter_position,
                position: card.position,
                text: card.text.as_deref(),
                back_text: card.back_text.as_deref(),
                flavor: card.flavor.as_deref(),
                traits: &traits,
                traits_text: card.traits.as_deref(),
                url: &card.url,
                imagesrc: card.imagesrc.as_deref(),
                backimagesrc: card.backimagesrc.as_deref(),
                back_flavor: card.back_flavor.as_deref(),
                raw_data: &record.raw,
                pack_code,
                pack_name: card.pack_name().unwrap_or(pack_code),
                quantity: card.quantity,
            },
        )
        .await?;
    }

    Ok(SeedReport {
        cards: records.len(),
        encounter_sets: sets.len(),
        ..SeedReport::default()
    })
}

/// Write campaigns, their scenarios, and scenario encounter-set links.
///
/// Every encounter code must already exist, so cards are seeded first.
pub async fn seed_campaigns(
    conn: &mut PgConnection,
    campaigns: &[CampaignDocument],
) -> Result<SeedReport, IngestError> {
    let mut report = SeedReport::default();

    for (campaign_index, campaign) in campaigns.iter().enumerate() {
        upsert_campaign(
            &mut *conn,
            &CampaignUpsert {
                code: &campaign.campaign_code,
                name: &campaign.campaign_name,
                position: position(campaign_index),
            },
        )
        .await?;
        report.campaigns += 1;

        for (scenario_index, scenario) in campaign.scenarios.iter().enumerate() {
            upsert_scenario(
                &mut *conn,
                &ScenarioUpsert {
                    code: &scenario.scenario_code,
                    name: &scenario.scenario_name,
                    prefix: scenario.scenario_prefix.as_deref(),
                    campaign_code: Some(&campaign.campaign_code),
                    position: position(scenario_index),
                },
            )
            .await?;
            report.scenarios += 1;

            for (link_index, encounter_code) in scenario.encounter_codes.iter().enumerate() {
                link_encounter_set(
                    &mut *conn,
                    encounter_code,
                    &scenario.scenario_code,
                    position(link_index),
                )
                .await?;
                report.encounter_links += 1;
            }
        }
    }

    Ok(report)
}

/// 1-based position for a 0-based index
fn position(index: usize) -> i32 {
    i32::try_from(index + 1).unwrap_or(i32::MAX)
}
