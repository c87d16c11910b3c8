//! Database operations for the `product_data` (observation) table.

use pricegrab_core::ObservationRow;
use sqlx::SqlitePool;

use crate::schema::{
    count_matching, insert_values, is_present, select_rows, InsertOutcome, OBSERVATION_TABLE,
};
use crate::DbError;

/// Whether an observation exists for `skuid` on `date`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the count query fails.
pub async fn has_observation(pool: &SqlitePool, skuid: &str, date: &str) -> Result<bool, DbError> {
    let count = count_matching(
        pool,
        OBSERVATION_TABLE,
        &[("skuid", skuid), ("date", date)],
    )
    .await?;
    Ok(is_present(count, OBSERVATION_TABLE, skuid))
}

/// Stores `row` unless an observation for the same SKU and date exists.
///
/// # Errors
///
/// Returns [`DbError`] if the presence check or the insert fails.
pub async fn insert_observation_if_absent(
    pool: &SqlitePool,
    row: &ObservationRow,
) -> Result<InsertOutcome, DbError> {
    if has_observation(pool, &row.skuid, &row.date).await? {
        return Ok(InsertOutcome::Skipped);
    }
    insert_values(pool, OBSERVATION_TABLE, &row.values()).await?;
    Ok(InsertOutcome::Inserted)
}

/// All observations for `skuid` in insertion order (oldest first under one
/// scrape per day).
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a stored row has the wrong shape.
pub async fn history_for(pool: &SqlitePool, skuid: &str) -> Result<Vec<ObservationRow>, DbError> {
    select_rows(pool, OBSERVATION_TABLE, "skuid = ?", skuid)
        .await?
        .into_iter()
        .map(|values| ObservationRow::from_values(values).map_err(DbError::from))
        .collect()
}

/// Every SKU with at least one observation, ordered by its first
/// observation.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn observed_skus(pool: &SqlitePool) -> Result<Vec<String>, DbError> {
    let skus = sqlx::query_scalar::<_, String>(&format!(
        "SELECT skuid FROM {} GROUP BY skuid ORDER BY MIN(rowid)",
        OBSERVATION_TABLE.name
    ))
    .fetch_all(pool)
    .await?;
    Ok(skus)
}
