pub mod client;
pub mod error;
pub mod extract;
pub mod page;

pub use client::PageClient;
pub use error::ScraperError;
pub use extract::{extract_variants, locate_variant_script, MissingStructure};
pub use page::{extract_common_items, CommonItemValue};
pub use scraper::Html;
