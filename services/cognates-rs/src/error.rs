//! Error types for the cognate detection kernel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CognateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input strings cannot have different sizes: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Malformed alignment: {0}")]
    MalformedAlignment(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CognateResult<T> = Result<T, CognateError>;

impl CognateError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
