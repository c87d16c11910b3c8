use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{ParameterIndex, ProductDataset, SizeCategory, Vocabulary, PARAMETER_COUNT};
use crate::ConfigError;

/// One product family to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    pub size_category: SizeCategory,
    pub link: String,
}

/// A page-wide attribute printed in detailed mode: the first `node` match,
/// then the first `child` match inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonItem {
    pub name: String,
    pub node: String,
    pub child: String,
}

/// The scrape catalog: products, per-category vocabularies, and common page
/// selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<ProductEntry>,
    pub vocabularies: BTreeMap<SizeCategory, Vocabulary>,
    #[serde(default)]
    pub common_items: Vec<CommonItem>,
}

impl Catalog {
    #[must_use]
    pub fn parameter_index(&self) -> ParameterIndex {
        ParameterIndex::new(self.vocabularies.clone())
    }

    /// Search descriptors for every product, in catalog order.
    ///
    /// Products whose category lacks a usable vocabulary are skipped; a
    /// validated catalog has none.
    #[must_use]
    pub fn datasets(&self) -> Vec<ProductDataset> {
        let index = self.parameter_index();
        self.products
            .iter()
            .filter_map(|p| index.dataset(&p.name, &p.link, p.size_category))
            .collect()
    }
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse and validate catalog YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    for (category, vocabulary) in &catalog.vocabularies {
        if vocabulary.parameters.len() != PARAMETER_COUNT {
            return Err(ConfigError::Validation(format!(
                "{category} has {} parameter labels; expected {PARAMETER_COUNT}",
                vocabulary.parameters.len()
            )));
        }
        if vocabulary.sizes.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{category} has no size labels"
            )));
        }
        if vocabulary
            .sizes
            .iter()
            .chain(&vocabulary.parameters)
            .any(|label| label.is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "{category} contains an empty label"
            )));
        }
    }

    let mut seen_names = HashSet::new();
    for product in &catalog.products {
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(product.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate product name: '{}'",
                product.name
            )));
        }

        if !catalog.vocabularies.contains_key(&product.size_category) {
            return Err(ConfigError::Validation(format!(
                "product '{}' uses size category {} which has no vocabulary",
                product.name, product.size_category
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
