//! The flat per-variant record and its two storage projections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Number of positions in a [`ProductRecord`].
pub const RECORD_FIELD_COUNT: usize = 12;

/// Field labels in record order, used by the detailed and CSV outputs.
pub const RECORD_FIELD_NAMES: [&str; RECORD_FIELD_COUNT] = [
    "name",
    "date",
    "discount",
    "price",
    "inventory",
    "available",
    "keysize",
    "width",
    "size",
    "msrp",
    "color",
    "skuid",
];

/// Formats a calendar date as the `YYYYMMDD` stamp stored with observations.
#[must_use]
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// One extracted variant observation.
///
/// Field order matches [`RECORD_FIELD_NAMES`]. Values are free text exactly
/// as extracted; a parameter that was not found is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub date: String,
    pub discount: String,
    pub price: String,
    pub inventory: String,
    pub available: String,
    pub keysize: String,
    pub width: String,
    pub size: String,
    pub msrp: String,
    pub color: String,
    pub skuid: String,
}

impl ProductRecord {
    /// Builds a record from positional values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FieldCount`] unless exactly
    /// [`RECORD_FIELD_COUNT`] values are supplied.
    pub fn from_fields(fields: Vec<String>) -> Result<Self, CoreError> {
        let fields: [String; RECORD_FIELD_COUNT] =
            fields.try_into().map_err(|v: Vec<String>| CoreError::FieldCount {
                expected: RECORD_FIELD_COUNT,
                actual: v.len(),
            })?;
        let [name, date, discount, price, inventory, available, keysize, width, size, msrp, color, skuid] =
            fields;
        Ok(Self {
            name,
            date,
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
        })
    }

    /// Values in record order.
    #[must_use]
    pub fn fields(&self) -> [&str; RECORD_FIELD_COUNT] {
        [
            &self.name,
            &self.date,
            &self.discount,
            &self.price,
            &self.inventory,
            &self.available,
            &self.keysize,
            &self.width,
            &self.size,
            &self.msrp,
            &self.color,
            &self.skuid,
        ]
    }

    /// Positions 0, 6, 7, 8, 9, 10, 11.
    #[must_use]
    pub fn identity(&self) -> IdentityRow {
        IdentityRow {
            name: self.name.clone(),
            keysize: self.keysize.clone(),
            width: self.width.clone(),
            size: self.size.clone(),
            msrp: self.msrp.clone(),
            color: self.color.clone(),
            skuid: self.skuid.clone(),
        }
    }

    /// Positions 1, 2, 3, 4, 5, 11.
    #[must_use]
    pub fn observation(&self) -> ObservationRow {
        ObservationRow {
            date: self.date.clone(),
            discount: self.discount.clone(),
            price: self.price.clone(),
            inventory: self.inventory.clone(),
            available: self.available.clone(),
            skuid: self.skuid.clone(),
        }
    }

    /// Splits the record into its static and dynamic projections. The SKU is
    /// carried by both.
    #[must_use]
    pub fn split(&self) -> (IdentityRow, ObservationRow) {
        (self.identity(), self.observation())
    }
}

/// Attributes of a variant that do not change between observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRow {
    pub name: String,
    pub keysize: String,
    pub width: String,
    pub size: String,
    pub msrp: String,
    pub color: String,
    pub skuid: String,
}

impl IdentityRow {
    pub const COLUMNS: [&'static str; 7] =
        ["name", "keysize", "width", "size", "msrp", "color", "skuid"];

    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.keysize,
            &self.width,
            &self.size,
            &self.msrp,
            &self.color,
            &self.skuid,
        ]
    }

    /// # Errors
    ///
    /// Returns [`CoreError::FieldCount`] unless exactly seven values are supplied.
    pub fn from_values(values: Vec<String>) -> Result<Self, CoreError> {
        let values: [String; 7] = values.try_into().map_err(|v: Vec<String>| CoreError::FieldCount {
            expected: Self::COLUMNS.len(),
            actual: v.len(),
        })?;
        let [name, keysize, width, size, msrp, color, skuid] = values;
        Ok(Self {
            name,
            keysize,
            width,
            size,
            msrp,
            color,
            skuid,
        })
    }
}

/// A dated snapshot of the variable attributes of one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub date: String,
    pub discount: String,
    pub price: String,
    pub inventory: String,
    pub available: String,
    pub skuid: String,
}

impl ObservationRow {
    pub const COLUMNS: [&'static str; 6] =
        ["date", "discount", "price", "inventory", "available", "skuid"];

    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        vec![
            &self.date,
            &self.discount,
            &self.price,
            &self.inventory,
            &self.available,
            &self.skuid,
        ]
    }

    /// # Errors
    ///
    /// Returns [`CoreError::FieldCount`] unless exactly six values are supplied.
    pub fn from_values(values: Vec<String>) -> Result<Self, CoreError> {
        let values: [String; 6] = values.try_into().map_err(|v: Vec<String>| CoreError::FieldCount {
            expected: Self::COLUMNS.len(),
            actual: v.len(),
        })?;
        let [date, discount, price, inventory, available, skuid] = values;
        Ok(Self {
            date,
            discount,
            price,
            inventory,
            available,
            skuid,
        })
    }

    /// Compares discount, price, inventory and availability. Date and SKU are
    /// ignored.
    #[must_use]
    pub fn same_readings(&self, other: &ObservationRow) -> bool {
        self.discount == other.discount
            && self.price == other.price
            && self.inventory == other.inventory
            && self.available == other.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<String> {
        [
            "Tire Schwalbe Big Ben Plus MTB - GreenGuard",
            "20201008",
            "26%",
            "€24.99",
            "IN STOCK(5+)",
            "true",
            "26''",
            "2.15''",
            "Wire Bead",
            "€33.99",
            "Black",
            "sku565936",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    #[test]
    fn from_fields_maps_positions() {
        let record = ProductRecord::from_fields(sample_fields()).unwrap();
        assert_eq!(record.name, "Tire Schwalbe Big Ben Plus MTB - GreenGuard");
        assert_eq!(record.date, "20201008");
        assert_eq!(record.price, "€24.99");
        assert_eq!(record.skuid, "sku565936");
        assert_eq!(record.fields()[9], "€33.99");
    }

    #[test]
    fn from_fields_rejects_wrong_count() {
        let mut fields = sample_fields();
        fields.pop();
        let err = ProductRecord::from_fields(fields).unwrap_err();
        assert!(matches!(err, CoreError::FieldCount { expected: 12, actual: 11 }));
    }

    #[test]
    fn row_field_count_error_does_not_mention_records() {
        let err = IdentityRow::from_values(vec!["Lube".to_string(), "sku1".to_string()]).unwrap_err();
        assert!(matches!(err, CoreError::FieldCount { expected: 7, actual: 2 }));
        assert_eq!(err.to_string(), "expected 7 fields but got 2");

        let err = ObservationRow::from_values(Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "expected 6 fields but got 0");
    }

    #[test]
    fn split_projects_identity_and_observation() {
        let record = ProductRecord::from_fields(sample_fields()).unwrap();
        let (identity, observation) = record.split();

        assert_eq!(
            identity.values(),
            vec![
                "Tire Schwalbe Big Ben Plus MTB - GreenGuard",
                "26''",
                "2.15''",
                "Wire Bead",
                "€33.99",
                "Black",
                "sku565936"
            ]
        );
        assert_eq!(
            observation.values(),
            vec!["20201008", "26%", "€24.99", "IN STOCK(5+)", "true", "sku565936"]
        );
    }

    #[test]
    fn projections_line_up_with_their_columns() {
        let record = ProductRecord::from_fields(sample_fields()).unwrap();
        assert_eq!(record.identity().values().len(), IdentityRow::COLUMNS.len());
        assert_eq!(record.observation().values().len(), ObservationRow::COLUMNS.len());
    }

    #[test]
    fn same_readings_ignores_date_and_sku() {
        let a = ObservationRow::from_values(
            ["20200101", "10%", "€10", "IN STOCK", "true", "sku1"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        )
        .unwrap();
        let mut b = a.clone();
        b.date = "20200102".to_string();
        b.skuid = "sku2".to_string();
        assert!(a.same_readings(&b));

        b.inventory = "Out of stock".to_string();
        assert!(!a.same_readings(&b));
    }

    #[test]
    fn date_stamp_is_compact() {
        let date = NaiveDate::from_ymd_opt(2020, 10, 8).unwrap();
        assert_eq!(date_stamp(date), "20201008");
    }
}
