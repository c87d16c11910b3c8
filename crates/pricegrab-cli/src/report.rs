//! Read-only commands over the store: `show`, `changes` and `config`.

use pricegrab_core::{AppConfig, Catalog, ChangeKind, IdentityRow, ObservationRow};
use pricegrab_db::{ChangedProduct, ProductHistory};
use sqlx::SqlitePool;

const SEPARATOR: &str = "|";

pub(crate) fn identity_line(identity: &IdentityRow) -> String {
    identity.values().join(SEPARATOR)
}

pub(crate) fn observation_line(observation: &ObservationRow) -> String {
    observation.values().join(SEPARATOR)
}

/// Identity line, then one line per observation.
pub(crate) fn history_block(product: &ProductHistory) -> String {
    std::iter::once(identity_line(&product.identity))
        .chain(product.history.iter().map(observation_line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header naming the change, then identity, before and after lines.
pub(crate) fn change_block(kind: ChangeKind, change: &ChangedProduct) -> String {
    [
        format!("{}: {}", kind.label(), change.identity.name),
        identity_line(&change.identity),
        observation_line(&change.before),
        observation_line(&change.after),
    ]
    .join("\n")
}

pub(crate) async fn show_all(pool: &SqlitePool) -> anyhow::Result<()> {
    let skus = pricegrab_db::all_skus(pool).await?;
    print_products(pool, &skus).await
}

pub(crate) async fn show_sku(pool: &SqlitePool, skuid: &str) -> anyhow::Result<()> {
    match pricegrab_db::product_history(pool, skuid).await? {
        Some(product) => println!("{}", history_block(&product)),
        None => println!("no product with SKU {skuid}"),
    }
    Ok(())
}

pub(crate) async fn show_name(pool: &SqlitePool, fragment: &str) -> anyhow::Result<()> {
    let skus = pricegrab_db::skus_with_name_like(pool, fragment).await?;
    if skus.is_empty() {
        println!("no product name contains \"{fragment}\"");
        return Ok(());
    }
    print_products(pool, &skus).await
}

async fn print_products(pool: &SqlitePool, skus: &[String]) -> anyhow::Result<()> {
    for skuid in skus {
        if let Some(product) = pricegrab_db::product_history(pool, skuid).await? {
            println!("{}\n", history_block(&product));
        }
    }
    tracing::debug!(products = skus.len(), "printed products");
    Ok(())
}

pub(crate) async fn show_changes(
    pool: &SqlitePool,
    kind: ChangeKind,
    json: bool,
) -> anyhow::Result<()> {
    let report = pricegrab_db::changed_products(pool, kind).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for change in &report {
        println!("{}\n", change_block(kind, change));
    }
    tracing::info!(changed = report.len(), "{} products", kind.label());
    Ok(())
}

pub(crate) fn show_config(config: &AppConfig, catalog: &Catalog) {
    println!("{config:?}");
    for dataset in catalog.datasets() {
        println!("{dataset}");
    }
    for item in &catalog.common_items {
        println!("{}|{}|{}", item.name, item.node, item.child);
    }
}
