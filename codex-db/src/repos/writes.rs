//! Upsert statements used by the seeder
//!
//! Every write is `INSERT ... ON CONFLICT (natural key) DO UPDATE`, so a
//! re-run overwrites rows in place instead of duplicating them. Functions
//! take a bare connection so callers can wrap a whole document in one
//! transaction (`&mut *tx`).

use sqlx::PgConnection;

use super::DbError;

/// Campaign write
#[derive(Debug, Clone)]
pub struct CampaignUpsert<'a> {
    pub code: &'a str,
    pub name: &'a str,
    /// 1-based catalog position
    pub position: i32,
}

/// Scenario write
#[derive(Debug, Clone)]
pub struct ScenarioUpsert<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub prefix: Option<&'a str>,
    pub campaign_code: Option<&'a str>,
    /// 1-based position inside the campaign
    pub position: i32,
}

/// Encounter set write
#[derive(Debug, Clone)]
pub struct EncounterSetUpsert<'a> {
    pub code: &'a str,
    pub name: &'a str,
}

/// Card write
#[derive(Debug, Clone)]
pub struct CardUpsert<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub real_name: Option<&'a str>,
    pub type_code: &'a str,
    pub type_name: &'a str,
    pub faction_code: &'a str,
    pub faction_name: &'a str,
    pub encounter_code: Option<&'a str>,
    pub encounter_name: Option<&'a str>,
    pub encounter_position: Option<i32>,
    pub position: Option<i32>,
    pub text: Option<&'a str>,
    pub back_text: Option<&'a str>,
    pub flavor: Option<&'a str>,
    pub traits: &'a [String],
    pub traits_text: Option<&'a str>,
    pub url: &'a str,
    pub imagesrc: Option<&'a str>,
    pub backimagesrc: Option<&'a str>,
    pub back_flavor: Option<&'a str>,
    pub raw_data: &'a serde_json::Value,
    pub pack_code: &'a str,
    pub pack_name: &'a str,
    pub quantity: Option<i32>,
}

pub async fn upsert_campaign(
    conn: &mut PgConnection,
    campaign: &CampaignUpsert<'_>,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO campaign (campaign_code, campaign_name, position)
        VALUES ($1, $2, $3)
        ON CONFLICT (campaign_code) DO UPDATE SET
            campaign_name = EXCLUDED.campaign_name,
            position = EXCLUDED.position,
            updated_at = NOW()
        "#,
    )
    .bind(campaign.code)
    .bind(campaign.name)
    .bind(campaign.position)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn upsert_scenario(
    conn: &mut PgConnection,
    scenario: &ScenarioUpsert<'_>,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO scenario (scenario_code, scenario_name, scenario_prefix, campaign_code, position)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (scenario_code) DO UPDATE SET
            scenario_name = EXCLUDED.scenario_name,
            scenario_prefix = EXCLUDED.scenario_prefix,
            campaign_code = EXCLUDED.campaign_code,
            position = EXCLUDED.position,
            updated_at = NOW()
        "#,
    )
    .bind(scenario.code)
    .bind(scenario.name)
    .bind(scenario.prefix)
    .bind(scenario.campaign_code)
    .bind(scenario.position)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn upsert_encounter_set(
    conn: &mut PgConnection,
    set: &EncounterSetUpsert<'_>,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO encounter_set (encounter_code, encounter_name)
        VALUES ($1, $2)
        ON CONFLICT (encounter_code) DO UPDATE SET
            encounter_name = EXCLUDED.encounter_name,
            updated_at = NOW()
        "#,
    )
    .bind(set.code)
    .bind(set.name)
    .execute(conn)
    .await?;
    Ok(())
}

/// Attach an encounter set to a scenario at a 1-based position.
pub async fn link_encounter_set(
    conn: &mut PgConnection,
    encounter_code: &str,
    scenario_code: &str,
    position: i32,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO encounter_set_scenario (encounter_code, scenario_code, position)
        VALUES ($1, $2, $3)
        ON CONFLICT (encounter_code, scenario_code) DO UPDATE SET
            position = EXCLUDED.position
        "#,
    )
    .bind(encounter_code)
    .bind(scenario_code)
    .bind(position)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn upsert_card(conn: &mut PgConnection, card: &CardUpsert<'_>) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO card (
            card_code, card_name, real_name, type_code, type_name,
            faction_code, faction_name, encounter_code, encounter_name,
            encounter_position, position, text, back_text, flavor, traits,
            traits_text, url, imagesrc, backimagesrc, back_flavor, raw_data,
            pack_code, pack_name, quantity
        ) VALUES (
            $1, $2, $3, $4, $5,
            $6, $7, $8, $9,
            $10, $11, $12, $13, $14, $15,
            $16, $17, $18, $19, $20, $21,
            $22, $23, $24
        ) ON CONFLICT (card_code) DO UPDATE SET
            card_name = EXCLUDED.card_name,
            real_name = EXCLUDED.real_name,
            type_code = EXCLUDED.type_code,
            type_name = EXCLUDED.type_name,
            faction_code = EXCLUDED.faction_code,
            faction_name = EXCLUDED.faction_name,
            encounter_code = EXCLUDED.encounter_code,
            encounter_name = EXCLUDED.encounter_name,
            encounter_position = EXCLUDED.encounter_position,
            position = EXCLUDED.position,
            text = EXCLUDED.text,
            back_text = EXCLUDED.back_text,
            flavor = EXCLUDED.flavor,
            traits = EXCLUDED.traits,
            traits_text = EXCLUDED.traits_text,
            url = EXCLUDED.url,
            imagesrc = EXCLUDED.imagesrc,
            backimagesrc = EXCLUDED.backimagesrc,
            back_flavor = EXCLUDED.back_flavor,
            raw_data = EXCLUDED.raw_data,
            pack_code = EXCLUDED.pack_code,
            pack_name = EXCLUDED.pack_name,
            quantity = EXCLUDED.quantity,
            updated_at = NOW()
        "#,
    )
    .bind(card.code)
    .bind(card.name)
    .bind(card.real_name)
    .bind(card.type_code)
    .bind(card.type_name)
    .bind(card.faction_code)
    .bind(card.faction_name)
    .bind(card.encounter_code)
    .bind(card.encounter_name)
    .bind(card.encounter_position)
    .bind(card.position)
    .bind(card.text)
    .bind(card.back_text)
    .bind(card.flavor)
    .bind(card.traits)
    .bind(card.traits_text)
    .bind(card.url)
    .bind(card.imagesrc)
    .bind(card.backimagesrc)
    .bind(card.back_flavor)
    .bind(card.raw_data)
    .bind(card.pack_code)
    .bind(card.pack_name)
    .bind(card.quantity)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{CampaignRepo, CardRepo, EncounterSetRepo, ScenarioRepo, SearchRepo};
    use serde_json::json;
    use sqlx::PgPool;

    // Run with: DATABASE_URL=postgres://... cargo test -p codex-db -- --ignored

    fn card<'a>(
        code: &'a str,
        name: &'a str,
        type_code: &'a str,
        encounter: Option<(&'a str, i32)>,
        traits: &'a [String],
        raw: &'a serde_json::Value,
    ) -> CardUpsert<'a> {
        CardUpsert {
            code,
            name,
            real_name: None,
            type_code,
            type_name: "Enemy",
            faction_code: "mythos",
            faction_name: "Mythos",
            encounter_code: encounter.map(|(c, _)| c),
            encounter_name: encounter.map(|_| "The Gathering"),
            encounter_position: encounter.map(|(_, p)| p),
            position: Some(1),
            text: Some("Hunter. Retaliate."),
            back_text: None,
            flavor: None,
            traits,
            traits_text: None,
            url: "https://arkhamdb.com/card/01160",
            imagesrc: Some("/bundles/cards/01160.png"),
            backimagesrc: None,
            back_flavor: None,
            raw_data: raw,
            pack_code: "core",
            pack_name: "Core Set",
            quantity: Some(3),
        }
    }

    async fn seed_gathering(pool: &PgPool) -> Result<(), DbError> {
        let mut conn = pool.acquire().await?;
        let raw = json!({});
        let traits = vec!["Humanoid".to_string(), "Monster".to_string(), "Ghoul".to_string()];

        upsert_campaign(
            &mut conn,
            &CampaignUpsert { code: "notz", name: "Night of the Zealot", position: 1 },
        )
        .await?;
        for (position, (code, name)) in [("the_gathering", "The Gathering"), ("the_midnight_masks", "The Midnight Masks")]
            .into_iter()
            .enumerate()
        {
            upsert_scenario(
                &mut conn,
                &ScenarioUpsert {
                    code,
                    name,
                    prefix: None,
                    campaign_code: Some("notz"),
                    position: position as i32 + 1,
                },
            )
            .await?;
        }
        for (code, name) in [("torch", "The Gathering"), ("ghouls", "Ghouls"), ("rats", "Rats")] {
            upsert_encounter_set(&mut conn, &EncounterSetUpsert { code, name }).await?;
        }
        link_encounter_set(&mut conn, "torch", "the_gathering", 1).await?;
        link_encounter_set(&mut conn, "rats", "the_gathering", 3).await?;
        link_encounter_set(&mut conn, "ghouls", "the_gathering", 2).await?;
        link_encounter_set(&mut conn, "ghouls", "the_midnight_masks", 2).await?;

        upsert_card(&mut conn, &card("01160", "Ghoul Priest", "enemy", Some(("ghouls", 2)), &traits, &raw)).await?;
        upsert_card(&mut conn, &card("01159", "Ravenous Ghoul", "enemy", Some(("ghouls", 1)), &traits, &raw)).await?;
        upsert_card(&mut conn, &card("01159r", "Swarm of Rats", "enemy", Some(("rats", 1)), &[], &raw)).await?;
        upsert_card(&mut conn, &card("01104", "The Gathering", "scenario", Some(("torch", 1)), &[], &raw)).await?;
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn upserting_card_twice_keeps_one_row_with_latest_values(
        pool: PgPool,
    ) -> Result<(), DbError> {
        seed_gathering(&pool).await?;
        let raw = json!({"code": "01160"});
        let mut conn = pool.acquire().await?;
        let mut renamed = card("01160", "Ghoul Priest (Revised)", "enemy", Some(("ghouls", 2)), &[], &raw);
        renamed.quantity = Some(1);
        upsert_card(&mut conn, &renamed).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM card WHERE card_code = $1")
            .bind("01160")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);

        let stored = CardRepo::new(&pool).get("01160").await?;
        assert_eq!(stored.card_name, "Ghoul Priest (Revised)");
        assert_eq!(stored.quantity, Some(1));
        assert!(stored.traits.is_empty());
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn lookups_miss_with_not_found(pool: PgPool) -> Result<(), DbError> {
        assert!(CardRepo::new(&pool).get("nope").await.unwrap_err().is_not_found());
        assert!(CampaignRepo::new(&pool).get("nope").await.unwrap_err().is_not_found());
        assert!(ScenarioRepo::new(&pool).get("nope").await.unwrap_err().is_not_found());
        assert!(EncounterSetRepo::new(&pool).get("nope").await.unwrap_err().is_not_found());
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn association_lists_follow_stored_positions(pool: PgPool) -> Result<(), DbError> {
        seed_gathering(&pool).await?;

        let sets = ScenarioRepo::new(&pool).encounter_sets("the_gathering").await?;
        let codes: Vec<_> = sets.iter().map(|s| s.encounter_code.as_str()).collect();
        assert_eq!(codes, ["torch", "ghouls", "rats"]);
        assert_eq!(sets.iter().map(|s| s.position).collect::<Vec<_>>(), [1, 2, 3]);

        let cards = ScenarioRepo::new(&pool).cards("the_gathering").await?;
        let codes: Vec<_> = cards.iter().map(|c| c.card_code.as_str()).collect();
        assert_eq!(codes, ["01104", "01159", "01160", "01159r"]);

        let scenarios = CampaignRepo::new(&pool).scenarios("notz").await?;
        assert_eq!(scenarios[0].scenario_code, "the_gathering");
        assert_eq!(scenarios[1].scenario_code, "the_midnight_masks");
        assert_eq!(
            scenarios[0].image_url.as_deref(),
            Some("https://arkhamdb.com/bundles/cards/01160.png")
        );

        let related = CardRepo::new(&pool).scenarios("ghouls").await?;
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].campaign_name.as_deref(), Some("Night of the Zealot"));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn search_matches_every_term(pool: PgPool) -> Result<(), DbError> {
        seed_gathering(&pool).await?;
        let repo = SearchRepo::new(&pool);

        let hits = repo.search("ghoul & priest", 20).await?;
        assert_eq!(hits[0].code, "01160");
        assert_eq!(hits[0].kind, "card");

        // scenario-type cards are represented by their scenario entry
        let hits = repo.search("gathering", 20).await?;
        assert!(hits.iter().all(|h| h.code != "01104"));
        assert!(hits.iter().any(|h| h.kind == "scenario" && h.code == "the_gathering"));

        let hits = repo.search("ghoul", 1).await?;
        assert_eq!(hits.len(), 1);
        Ok(())
    }
}
