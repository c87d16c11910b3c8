//! Variant extraction from the inline `allVariants` script of a product page.
//!
//! The script is cut into blocks at every literal `}` (no brace nesting is
//! tracked). A block is a variant entry when it contains one of the
//! configured size labels and the qualifying parameter label. Each entry is
//! read line by line: for every configured parameter, in configured order,
//! the first non-filler line containing the label supplies the value.

use std::sync::LazyLock;

use pricegrab_core::{ProductDataset, ProductRecord};
use regex::Regex;
use scraper::{Html, Selector};

/// Container holding the variant data on a product page.
pub const VARIANTS_CONTAINER: &str = "div.crcPDPVariants";

/// Text identifying the variant script inside the container.
pub const VARIANTS_SCRIPT_MARKER: &str = "allVariants";

static CONTAINER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(VARIANTS_CONTAINER).expect("valid container selector"));

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid script selector"));

// Whitespace followed by at most one non-word character.
static FILLER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\n\x0B\x0C\r]+[^A-Za-z0-9_]?$").expect("valid regex"));

/// Why a page produced no variant script. Neither case is an error: the
/// page simply has nothing to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStructure {
    NoVariantsContainer,
    NoVariantsScript,
}

impl std::fmt::Display for MissingStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingStructure::NoVariantsContainer => {
                write!(f, "no product variants ({VARIANTS_CONTAINER}) found")
            }
            MissingStructure::NoVariantsScript => {
                write!(f, "no {VARIANTS_SCRIPT_MARKER} script found")
            }
        }
    }
}

/// Returns the text of the first script inside the variants container that
/// mentions [`VARIANTS_SCRIPT_MARKER`].
///
/// # Errors
///
/// Returns the [`MissingStructure`] describing which marker was absent.
pub fn locate_variant_script(document: &Html) -> Result<String, MissingStructure> {
    let container = document
        .select(&CONTAINER_SELECTOR)
        .next()
        .ok_or(MissingStructure::NoVariantsContainer)?;

    container
        .select(&SCRIPT_SELECTOR)
        .map(|script| script.text().collect::<String>())
        .find(|text| text.contains(VARIANTS_SCRIPT_MARKER))
        .ok_or(MissingStructure::NoVariantsScript)
}

/// Extracts every variant entry of `document` as a [`ProductRecord`] stamped
/// with `date`.
///
/// A block matching several size labels is emitted once per matching label.
/// Missing page structure yields an empty list and a warning.
#[must_use]
pub fn extract_variants(document: &Html, dataset: &ProductDataset, date: &str) -> Vec<ProductRecord> {
    let script = match locate_variant_script(document) {
        Ok(script) => script,
        Err(missing) => {
            tracing::warn!(product = %dataset.name, "{missing}");
            return Vec::new();
        }
    };

    let records = extract_from_script(&script, dataset, date);
    tracing::debug!(
        product = %dataset.name,
        variants = records.len(),
        "extracted variants"
    );
    records
}

/// Block segmentation and record building over raw script text.
#[must_use]
pub fn extract_from_script(script: &str, dataset: &ProductDataset, date: &str) -> Vec<ProductRecord> {
    let qualifier = dataset.qualifying_label();
    let mut records = Vec::new();

    for block in script.split('}') {
        if !block.contains(qualifier) {
            continue;
        }
        for size in &dataset.sizes {
            if block.contains(size.as_str()) {
                records.push(build_record(block, dataset, date));
            }
        }
    }

    records
}

/// Reads one variant block into a record: name, date, then one value per
/// configured parameter in configured order.
#[must_use]
pub fn build_record(block: &str, dataset: &ProductDataset, date: &str) -> ProductRecord {
    let lines: Vec<&str> = block.split('\n').collect();
    let [discount, price, inventory, available, keysize, width, size, msrp, color, skuid] =
        dataset.parameter_names.each_ref().map(|label| find_value(&lines, label));

    ProductRecord {
        name: dataset.name.clone(),
        date: date.to_string(),
        discount,
        price,
        inventory,
        available,
        keysize,
        width,
        size,
        msrp,
        color,
        skuid,
    }
}

/// Value of the first non-filler line containing `label`, or empty.
fn find_value(lines: &[&str], label: &str) -> String {
    lines
        .iter()
        .find(|line| !is_filler(line) && line.contains(label))
        .map(|line| clean_value(line))
        .unwrap_or_default()
}

fn is_filler(line: &str) -> bool {
    FILLER_LINE_RE.is_match(line)
}

/// Everything after the first `:`, with `\"` turned into `''`, remaining
/// double quotes and commas dropped, and surrounding whitespace trimmed.
fn clean_value(line: &str) -> String {
    let raw = line.find(':').map_or(line, |i| &line[i + 1..]);
    raw.replace("\\\"", "''")
        .replace(['"', ','], "")
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
