use shared::utils::FormatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Formatting error: {source}")]
    FormatError {
        #[from]
        source: FormatError,
    },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("CSV system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Whether the caller supplied bad input, as opposed to an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::FormatError { .. }
                | EngineError::ProjectNotFound(_)
                | EngineError::ValidationError(_)
                | EngineError::CsvDataFormatError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
