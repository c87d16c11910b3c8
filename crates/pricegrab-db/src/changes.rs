//! Per-SKU reports assembled from stored history.

use pricegrab_core::{ChangeKind, IdentityRow, ObservationRow};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::identities::identity_for;
use crate::observations::{history_for, observed_skus};
use crate::DbError;

/// A product's identity followed by its full observation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductHistory {
    pub identity: IdentityRow,
    pub history: Vec<ObservationRow>,
}

/// A SKU whose observations changed, with the pair that differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedProduct {
    pub identity: IdentityRow,
    pub before: ObservationRow,
    pub after: ObservationRow,
}

/// Identity and history for `skuid`, or `None` when the SKU is unknown.
///
/// # Errors
///
/// Returns [`DbError`] if a query fails.
pub async fn product_history(
    pool: &SqlitePool,
    skuid: &str,
) -> Result<Option<ProductHistory>, DbError> {
    let Some(identity) = identity_for(pool, skuid).await? else {
        return Ok(None);
    };
    let history = history_for(pool, skuid).await?;
    Ok(Some(ProductHistory { identity, history }))
}

/// Every observed SKU whose history yields a result for `kind`, ordered by
/// first observation. SKUs without a change are omitted, as are SKUs whose
/// identity row was never stored.
///
/// # Errors
///
/// Returns [`DbError`] if a query fails.
pub async fn changed_products(
    pool: &SqlitePool,
    kind: ChangeKind,
) -> Result<Vec<ChangedProduct>, DbError> {
    let mut report = Vec::new();

    for skuid in observed_skus(pool).await? {
        let history = history_for(pool, &skuid).await?;
        let Some((before, after)) = kind.detect(&history) else {
            continue;
        };

        let Some(identity) = identity_for(pool, &skuid).await? else {
            tracing::warn!(skuid = %skuid, "history without identity row; skipping");
            continue;
        };

        report.push(ChangedProduct {
            identity,
            before: before.clone(),
            after: after.clone(),
        });
    }

    tracing::debug!(kind = ?kind, changed = report.len(), "built change report");
    Ok(report)
}
