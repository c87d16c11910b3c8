//! Database operations for the `products` (identity) table.

use pricegrab_core::IdentityRow;
use sqlx::SqlitePool;

use crate::schema::{
    count_matching, insert_values, is_present, select_rows, strip_quotes, InsertOutcome,
    IDENTITY_TABLE,
};
use crate::DbError;

/// Whether an identity row exists for `skuid`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the count query fails.
pub async fn has_identity(pool: &SqlitePool, skuid: &str) -> Result<bool, DbError> {
    let count = count_matching(pool, IDENTITY_TABLE, &[("skuid", skuid)]).await?;
    Ok(is_present(count, IDENTITY_TABLE, skuid))
}

/// Stores `row` unless its SKU is already known. The first identity written
/// for a SKU is never revised.
///
/// # Errors
///
/// Returns [`DbError`] if the presence check or the insert fails.
pub async fn insert_identity_if_absent(
    pool: &SqlitePool,
    row: &IdentityRow,
) -> Result<InsertOutcome, DbError> {
    if has_identity(pool, &row.skuid).await? {
        return Ok(InsertOutcome::Skipped);
    }
    insert_values(pool, IDENTITY_TABLE, &row.values()).await?;
    Ok(InsertOutcome::Inserted)
}

/// The identity row stored for `skuid`, if any.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a stored row has the wrong shape.
pub async fn identity_for(pool: &SqlitePool, skuid: &str) -> Result<Option<IdentityRow>, DbError> {
    let rows = select_rows(pool, IDENTITY_TABLE, "skuid = ?", skuid).await?;
    match rows.into_iter().next() {
        Some(values) => Ok(Some(IdentityRow::from_values(values)?)),
        None => Ok(None),
    }
}

/// Every SKU in the identity table, in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn all_skus(pool: &SqlitePool) -> Result<Vec<String>, DbError> {
    let skus = sqlx::query_scalar::<_, String>(&format!(
        "SELECT skuid FROM {} ORDER BY rowid",
        IDENTITY_TABLE.name
    ))
    .fetch_all(pool)
    .await?;
    Ok(skus)
}

/// SKUs whose product name contains `fragment` (SQL `LIKE`, so ASCII
/// case-insensitive), in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn skus_with_name_like(
    pool: &SqlitePool,
    fragment: &str,
) -> Result<Vec<String>, DbError> {
    let skus = sqlx::query_scalar::<_, String>(&format!(
        "SELECT skuid FROM {} WHERE name LIKE ? ORDER BY rowid",
        IDENTITY_TABLE.name
    ))
    .bind(format!("%{}%", strip_quotes(fragment)))
    .fetch_all(pool)
    .await?;
    Ok(skus)
}
