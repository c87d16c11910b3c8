pub mod app_config;
pub mod catalog;
pub mod changes;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod record;

pub use app_config::AppConfig;
pub use catalog::{load_catalog, parse_catalog, Catalog, CommonItem, ProductEntry};
pub use changes::{ever_changed, recent_change, ChangeKind, ChangePair};
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{
    ParameterIndex, ProductDataset, SizeCategory, Vocabulary, PARAMETER_COUNT,
    QUALIFYING_PARAMETER_INDEX,
};
pub use error::{ConfigError, CoreError};
pub use output::OutputMode;
pub use record::{date_stamp, IdentityRow, ObservationRow, ProductRecord, RECORD_FIELD_COUNT};
