//! Size categories, per-category vocabularies, and the per-product search
//! descriptor handed to the extractor.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Number of parameter labels every vocabulary must carry.
pub const PARAMETER_COUNT: usize = 10;

/// Position of the label a script block must contain to count as a variant
/// entry (alongside one of the size labels).
pub const QUALIFYING_PARAMETER_INDEX: usize = 8;

/// The kind of size a product family is sold by. Selects which size and
/// parameter vocabularies apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeCategory {
    Size,
    ShoesSize,
    ClothingSize,
    WheelSize,
    Length,
    Diameter,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 6] = [
        SizeCategory::Size,
        SizeCategory::ShoesSize,
        SizeCategory::ClothingSize,
        SizeCategory::WheelSize,
        SizeCategory::Length,
        SizeCategory::Diameter,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SizeCategory::Size => "Size",
            SizeCategory::ShoesSize => "ShoesSize",
            SizeCategory::ClothingSize => "ClothingSize",
            SizeCategory::WheelSize => "WheelSize",
            SizeCategory::Length => "Length",
            SizeCategory::Diameter => "Diameter",
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeCategory {
    type Err = CoreError;

    /// Case-insensitive: `"WheelSize"`, `"wheelsize"` and `"WHEELSIZE"` are
    /// all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SizeCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownSizeCategory(s.to_string()))
    }
}

impl TryFrom<String> for SizeCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SizeCategory> for String {
    fn from(value: SizeCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Ordered size labels and ordered parameter labels for one size category.
///
/// Labels are kept verbatim (quotes included) since they are matched as
/// substrings of raw script text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub sizes: Vec<String>,
    pub parameters: Vec<String>,
}

/// Lookup from size category to its vocabulary.
#[derive(Debug, Clone, Default)]
pub struct ParameterIndex {
    entries: BTreeMap<SizeCategory, Vocabulary>,
}

impl ParameterIndex {
    #[must_use]
    pub fn new(entries: BTreeMap<SizeCategory, Vocabulary>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, category: SizeCategory) -> Option<&Vocabulary> {
        self.entries.get(&category)
    }

    /// Builds the search descriptor for one product family.
    ///
    /// Returns `None` when the category has no vocabulary or its parameter
    /// list is not exactly [`PARAMETER_COUNT`] long.
    #[must_use]
    pub fn dataset(&self, name: &str, link: &str, category: SizeCategory) -> Option<ProductDataset> {
        let vocabulary = self.get(category)?;
        let parameter_names: [String; PARAMETER_COUNT] =
            vocabulary.parameters.clone().try_into().ok()?;
        Some(ProductDataset {
            name: name.to_string(),
            link: link.to_string(),
            size_category: category,
            sizes: vocabulary.sizes.clone(),
            parameter_names,
        })
    }
}

/// Search descriptor for one product family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDataset {
    pub name: String,
    pub link: String,
    pub size_category: SizeCategory,
    pub sizes: Vec<String>,
    /// discount, price, inventory, availability, key size, width, size,
    /// msrp, color, skuid. Consumers index by position.
    pub parameter_names: [String; PARAMETER_COUNT],
}

impl ProductDataset {
    /// The label a block must contain (together with a size label) to be
    /// treated as a variant entry.
    #[must_use]
    pub fn qualifying_label(&self) -> &str {
        &self.parameter_names[QUALIFYING_PARAMETER_INDEX]
    }
}

impl std::fmt::Display for ProductDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{:?}|{:?}",
            self.name, self.size_category, self.link, self.parameter_names, self.sizes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel_vocabulary() -> Vocabulary {
        Vocabulary {
            sizes: vec![r#""26\"""#.to_string(), r#""27.5\"""#.to_string()],
            parameters: [
                r#""SAVE":"#,
                r#""RP":"#,
                r#""inventoryStatus":"#,
                r#""isInStock":"#,
                r#""WheelSize":"#,
                r#""Width":"#,
                r#""Size":"#,
                r#""RRP":"#,
                r#""Colour":"#,
                r#""skuId":"#,
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        }
    }

    #[test]
    fn size_category_parses_case_insensitively() {
        assert_eq!("WheelSize".parse::<SizeCategory>().unwrap(), SizeCategory::WheelSize);
        assert_eq!("wheelsize".parse::<SizeCategory>().unwrap(), SizeCategory::WheelSize);
        assert_eq!(" SHOESSIZE ".parse::<SizeCategory>().unwrap(), SizeCategory::ShoesSize);
    }

    #[test]
    fn size_category_rejects_unknown() {
        let err = "HatSize".parse::<SizeCategory>().unwrap_err();
        assert!(err.to_string().contains("HatSize"));
    }

    #[test]
    fn dataset_copies_vocabulary_in_order() {
        let mut entries = BTreeMap::new();
        entries.insert(SizeCategory::WheelSize, wheel_vocabulary());
        let index = ParameterIndex::new(entries);

        let ds = index
            .dataset("Tire Schwalbe Big Ben", "https://example.test/p", SizeCategory::WheelSize)
            .expect("dataset should build");

        assert_eq!(ds.sizes.len(), 2);
        assert_eq!(ds.parameter_names[0], r#""SAVE":"#);
        assert_eq!(ds.parameter_names[9], r#""skuId":"#);
        assert_eq!(ds.qualifying_label(), r#""Colour":"#);
    }

    #[test]
    fn dataset_is_none_for_missing_category() {
        let index = ParameterIndex::default();
        assert!(index.dataset("x", "y", SizeCategory::Length).is_none());
    }

    #[test]
    fn dataset_is_none_for_short_parameter_list() {
        let mut vocabulary = wheel_vocabulary();
        vocabulary.parameters.truncate(9);
        let mut entries = BTreeMap::new();
        entries.insert(SizeCategory::WheelSize, vocabulary);
        let index = ParameterIndex::new(entries);
        assert!(index.dataset("x", "y", SizeCategory::WheelSize).is_none());
    }
}
