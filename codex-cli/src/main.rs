//! codex - Otherworld Codex card catalog
//!
//! - `serve`: read-only JSON API over the catalog
//! - `migrate`: apply the embedded schema
//! - `fetch`: download the ArkhamDB card dump
//! - `seed`: load card and campaign documents into Postgres

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use codex_ingest::{FetchArgs, SeedArgs};

mod commands;
mod tracing_setup;

use commands::{MigrateArgs, ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "codex",
    author,
    version,
    about = "Card catalog API for Arkham Horror: The Card Game",
    long_about = "Serve campaigns, scenarios, encounter sets, and cards from Postgres, \
                  and keep the catalog in sync with ArkhamDB."
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Apply pending schema migrations
    Migrate(MigrateArgs),
    /// Download every card from ArkhamDB into a JSON file
    Fetch(FetchArgs),
    /// Upsert cards and campaigns from JSON files
    Seed(SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // before parsing so clap's `env` fallbacks see .env values
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Fetch(args) => {
            let count = codex_ingest::run_fetch(&args)
                .await
                .context("Failed to fetch cards")?;
            info!("fetched {} cards into {}", count, args.output.display());
        }
        Commands::Seed(args) => {
            let report = codex_ingest::run_seed(&args)
                .await
                .context("Failed to seed database")?;
            info!(
                "seeded {} cards ({} skipped), {} encounter sets, {} campaigns, {} scenarios",
                report.cards,
                report.skipped_cards,
                report.encounter_sets,
                report.campaigns,
                report.scenarios
            );
        }
    }
    Ok(())
}
