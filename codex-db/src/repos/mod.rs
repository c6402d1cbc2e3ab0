//! Query layer: one typed function per pre-defined statement
//!
//! Read repositories borrow the pool and map rows into plain structs with
//! `Option` for every nullable column. Lookups by code return
//! [`DbError::NotFound`] on zero rows so handlers can tell a miss from a
//! backend failure. Writes (used only by the seeder) live in [`writes`] and
//! take a connection so they can run inside a transaction.

pub mod campaigns;
pub mod cards;
pub mod encounter_sets;
pub mod scenarios;
pub mod search;
pub mod writes;

pub use campaigns::{Campaign, CampaignRepo, CampaignScenario};
pub use cards::{Card, CardRepo, RelatedScenario};
pub use encounter_sets::{EncounterSet, EncounterSetCard, EncounterSetRepo};
pub use scenarios::{Scenario, ScenarioCard, ScenarioEncounterSet, ScenarioRepo};
pub use search::{SearchHit, SearchRepo};
pub use writes::{CampaignUpsert, CardUpsert, EncounterSetUpsert, ScenarioUpsert};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: &str) -> Self {
        Self::NotFound {
            resource,
            id: id.to_owned(),
        }
    }

    /// True when the lookup matched zero rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
