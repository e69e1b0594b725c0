use mltools_tree::TreeError;
use thiserror::Error;

/// Errors returned by the trainer.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} fields, got {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("preprocessing error: {0}")]
    Preprocessing(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Result type for trainer operations
pub type Result<T> = std::result::Result<T, TrainerError>;
