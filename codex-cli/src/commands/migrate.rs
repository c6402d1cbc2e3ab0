use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Apply embedded migrations and report the resulting version
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = codex_db::create_pool(&args.database_url)
        .await
        .context("Failed to connect to database")?;

    let version = codex_db::migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!(
        "schema at version {} (latest embedded {})",
        version,
        codex_db::migrations::latest_embedded_version()
    );
    Ok(())
}
