use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use pricegrab_core::{AppConfig, CoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{table} row has {actual} values; expected {expected}")]
    ShapeMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Open a SQLite pool, creating the database file (and its directory) if
/// needed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the URL is malformed, the directory cannot be
/// created, or the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    ensure_parent_dir(options.get_filename())?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;
    Ok(pool)
}

fn ensure_parent_dir(filename: &Path) -> Result<(), sqlx::Error> {
    if filename.as_os_str() == ":memory:" {
        return Ok(());
    }
    match filename.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(sqlx::Error::Io)
        }
        _ => Ok(()),
    }
}


pub mod changes;
pub mod identities;
pub mod observations;
pub mod schema;

pub use changes::{changed_products, product_history, ChangedProduct, ProductHistory};
pub use identities::{
    all_skus, has_identity, identity_for, insert_identity_if_absent, skus_with_name_like,
};
pub use observations::{
    has_observation, history_for, insert_observation_if_absent, observed_skus,
};
pub use schema::{
    ensure_schema, insert_values, InsertOutcome, TableSpec, IDENTITY_TABLE, OBSERVATION_TABLE,
};
