use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid employee code: {0:?}")]
    InvalidCode(String),

    #[error("Employee not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid salary range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("Unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Cannot encode record {code}: {message}")]
    Encode { code: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl RosterError {
    pub(crate) fn parse(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
