//! HTTP server command
//!
//! Applies pending migrations, then serves the catalog API until
//! Ctrl+C/SIGTERM.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use codex_db::create_pool_with_options;
use codex_server::{run_server, CachePolicy, ServerConfig};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Deployment environment; "development" shortens Cache-Control max-age
    #[arg(long = "env", env = "ENV")]
    pub environment: Option<String>,

    /// Upper bound on pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = codex_db::pool::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.bind, self.port),
            cache: CachePolicy::for_environment(self.environment.as_deref()),
        }
    }
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting codex server on {}", config.bind_addr);

    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    codex_db::migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
