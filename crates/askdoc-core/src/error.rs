use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Extraction failed for {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn extraction(path: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::Extraction { path: path.to_string(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
