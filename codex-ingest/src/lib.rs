//! Offline data utilities: download the ArkhamDB card dump and load it,
//! together with the hand-maintained campaign document, into Postgres.

pub mod error;
pub mod fetch;
pub mod model;
pub mod seed;

use std::path::PathBuf;

use clap::Args;

pub use error::IngestError;
pub use fetch::run_fetch;
pub use seed::{run_seed, SeedReport};

/// Public ArkhamDB endpoint returning every card, encounter cards included
pub const DEFAULT_CARDS_URL: &str = "https://arkhamdb.com/api/public/cards?encounter=1";

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Source URL for the card dump
    #[arg(long, default_value = DEFAULT_CARDS_URL)]
    pub url: String,

    /// Where to write the card list
    #[arg(long, value_name = "PATH", default_value = "data/cards.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    #[arg(long, value_name = "PATH", default_value = "data/cards.json")]
    pub cards: PathBuf,

    #[arg(long, value_name = "PATH", default_value = "data/campaigns.json")]
    pub campaigns: PathBuf,
}
