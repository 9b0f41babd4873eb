use thiserror::Error;

/// Top-level error type for Arogya.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for ArogyaError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArogyaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Response table error: {0}")]
    ResponseTable(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

impl From<toml::de::Error> for ArogyaError {
    fn from(err: toml::de::Error) -> Self {
        ArogyaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ArogyaError {
    fn from(err: toml::ser::Error) -> Self {
        ArogyaError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Arogya operations.
pub type Result<T> = std::result::Result<T, ArogyaError>;
