//! The `scrape` command: fetch, extract and emit every catalog product.
//!
//! Products are processed one at a time. A failed fetch or write is logged
//! and the run moves on to the next product.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use pricegrab_core::{date_stamp, AppConfig, Catalog, OutputMode, ProductDataset, ProductRecord};
use pricegrab_db::InsertOutcome;
use pricegrab_scraper::{
    extract_common_items, extract_variants, CommonItemValue, Html, PageClient,
};
use sqlx::SqlitePool;

/// Row counts for the `db` output mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PersistTotals {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PersistTotals {
    fn record(&mut self, result: Result<InsertOutcome, pricegrab_db::DbError>, skuid: &str) {
        match result {
            Ok(InsertOutcome::Inserted) => self.inserted += 1,
            Ok(InsertOutcome::Skipped) => self.skipped += 1,
            Err(e) => {
                tracing::error!(skuid = %skuid, error = %e, "insert failed; skipping row");
                self.failed += 1;
            }
        }
    }
}

/// Runs one scrape over the whole catalog. `pool` must be `Some` for
/// [`OutputMode::Db`].
pub(crate) async fn run_scrape(
    config: &AppConfig,
    catalog: &Catalog,
    mode: OutputMode,
    pool: Option<&SqlitePool>,
) -> anyhow::Result<()> {
    let client = PageClient::new(config.request_timeout_secs, &config.user_agent)?;
    let datasets = catalog.datasets();

    let mut failed_products = 0_usize;
    let mut total_records = 0_usize;
    let mut totals = PersistTotals::default();

    for dataset in &datasets {
        tracing::info!(product = %dataset.name, "scraping");

        let body = match client.fetch_page(&dataset.link).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    product = %dataset.name,
                    error = %e,
                    "fetch failed; skipping product"
                );
                failed_products += 1;
                continue;
            }
        };

        let date = date_stamp(Local::now().date_naive());
        let (records, common) = {
            let document = Html::parse_document(&body);
            let records = extract_variants(&document, dataset, &date);
            let common = match mode {
                OutputMode::Detailed => extract_common_items(&document, &catalog.common_items),
                _ => Vec::new(),
            };
            (records, common)
        };
        total_records += records.len();

        match mode {
            OutputMode::Brief => {
                for record in &records {
                    println!("{}", mode.line(record));
                }
            }
            OutputMode::Detailed => {
                for item in common.iter().filter(|item| item.value.is_none()) {
                    tracing::warn!(product = %dataset.name, "no {} found", item.name);
                }
                println!("{}", detailed_report(&common, &records));
            }
            OutputMode::Csv => {
                if let Err(e) = write_csv(&config.output_dir, dataset, &records) {
                    tracing::error!(product = %dataset.name, error = %e, "could not write CSV");
                }
            }
            OutputMode::Db => {
                let Some(pool) = pool else {
                    anyhow::bail!("db output mode needs an open store");
                };
                for record in &records {
                    println!("{}", mode.line(record));
                    persist_record(pool, record, &mut totals).await;
                }
            }
        }
    }

    tracing::info!(
        products = datasets.len(),
        failed = failed_products,
        records = total_records,
        "scrape complete"
    );
    if mode == OutputMode::Db {
        tracing::info!(
            inserted = totals.inserted,
            skipped = totals.skipped,
            failed = totals.failed,
            "store updated"
        );
    }
    Ok(())
}

/// Splits `record` and stores both halves if absent. Errors are logged and
/// counted, never propagated.
pub(crate) async fn persist_record(
    pool: &SqlitePool,
    record: &ProductRecord,
    totals: &mut PersistTotals,
) {
    let (identity, observation) = record.split();
    totals.record(
        pricegrab_db::insert_identity_if_absent(pool, &identity).await,
        &record.skuid,
    );
    totals.record(
        pricegrab_db::insert_observation_if_absent(pool, &observation).await,
        &record.skuid,
    );
}

/// Common page items that were found, followed by one numbered block per
/// record.
pub(crate) fn detailed_report(common: &[CommonItemValue], records: &[ProductRecord]) -> String {
    let items = common.iter().filter_map(|item| {
        item.value
            .as_ref()
            .map(|text| format!("{} : {text}\n", item.name))
    });
    let blocks = records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}\n\n", OutputMode::detailed_block(record, i + 1)));
    items.chain(blocks).collect()
}

/// `crc_<name without spaces>.<YYYYMMDD-HHMMSS>.csv`
pub(crate) fn csv_file_name(product_name: &str, at: NaiveDateTime) -> String {
    let compact: String = product_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("crc_{compact}.{}.csv", at.format("%Y%m%d-%H%M%S"))
}

/// One comma-joined line per record, each terminated by CRLF.
pub(crate) fn csv_contents(records: &[ProductRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}\r\n", OutputMode::Csv.line(record)))
        .collect()
}

fn write_csv(
    output_dir: &Path,
    dataset: &ProductDataset,
    records: &[ProductRecord],
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(csv_file_name(&dataset.name, Local::now().naive_local()));
    std::fs::write(&path, csv_contents(records))?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote CSV");
    Ok(path)
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
