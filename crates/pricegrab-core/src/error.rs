use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("expected {expected} fields but got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("unknown size category: {0}")]
    UnknownSizeCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
