//! codex-db: storage layer for the card catalog
//!
//! Owns the Postgres schema (embedded migrations), the connection pool,
//! and one typed function per pre-defined statement. No SQL is built at
//! runtime; every query is a fixed, parameterized string.

pub mod migrations;
pub mod pool;
pub mod repos;

pub use migrations::MIGRATOR;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
