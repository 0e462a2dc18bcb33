use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Review table has no '{0}' column")]
    MissingColumn(String),

    #[error("Invalid {column} value {value:?} in row {row}")]
    InvalidValue { column: String, row: usize, value: String },

    #[error("Failed to read review table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
