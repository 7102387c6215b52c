use htooling::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FitnessError {
    #[error("missing required environment variable {name}")]
    MissingVar { name: &'static str },
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl FitnessError {
    pub fn missing_var(name: &'static str) -> Self {
        Self::MissingVar { name }
    }

    pub fn invalid_var(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidVar {
            name,
            reason: reason.into(),
        }
    }
}
