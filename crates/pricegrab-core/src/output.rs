//! Serializations of a [`ProductRecord`] for the four output modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::RECORD_FIELD_NAMES;
use crate::ProductRecord;

/// Where extracted records go. Selected once per scrape and passed
/// explicitly to the formatting step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Brief,
    Detailed,
    Csv,
    Db,
}

impl OutputMode {
    #[must_use]
    pub fn separator(self) -> &'static str {
        match self {
            OutputMode::Csv => ",",
            OutputMode::Db => ";",
            OutputMode::Brief => "|",
            OutputMode::Detailed => ", ",
        }
    }

    /// Single-line rendering of `record` with this mode's separator.
    #[must_use]
    pub fn line(self, record: &ProductRecord) -> String {
        record.fields().join(self.separator())
    }

    /// Multi-line rendering used by the detailed mode: an `Item N` header and
    /// one `label: value` line per field.
    #[must_use]
    pub fn detailed_block(record: &ProductRecord, number: usize) -> String {
        std::iter::once(format!("Item {number}"))
            .chain(
                RECORD_FIELD_NAMES
                    .iter()
                    .zip(record.fields())
                    .map(|(label, value)| format!("{label}: {value}")),
            )
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputMode::Brief => "brief",
            OutputMode::Detailed => "detailed",
            OutputMode::Csv => "csv",
            OutputMode::Db => "db",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brief" => Ok(OutputMode::Brief),
            "detailed" => Ok(OutputMode::Detailed),
            "csv" => Ok(OutputMode::Csv),
            "db" => Ok(OutputMode::Db),
            other => Err(format!(
                "unknown output mode '{other}'; expected brief, detailed, csv or db"
            )),
        }
    }
}
