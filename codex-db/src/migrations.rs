//! Embedded schema migrations
//!
//! The SQL files under `migrations/` are compiled into the binary. sqlx
//! records applied versions in `_sqlx_migrations`, so running twice is a
//! no-op.

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use crate::repos::DbError;

pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Apply pending migrations and return the latest applied version.
pub async fn run(pool: &PgPool) -> Result<i64, DbError> {
    tracing::info!("running migrations");
    MIGRATOR.run(pool).await?;

    let version = applied_version(pool).await?;
    tracing::info!(version, "migrations at version {}", version);
    Ok(version)
}

/// Latest successfully applied migration version, 0 when none.
pub async fn applied_version(pool: &PgPool) -> Result<i64, DbError> {
    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await?;
    Ok(version.unwrap_or(0))
}

/// Highest version embedded in this binary.
pub fn latest_embedded_version() -> i64 {
    MIGRATOR.iter().map(|m| m.version).max().unwrap_or(0)
}
