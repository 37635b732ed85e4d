//! Error types for promptloom
//!
//! Structured error definitions with thiserror; anyhow is used for
//! propagation at the application boundary. The completion core itself is
//! total over its inputs and never produces an error.

use thiserror::Error;

/// Main error type for promptloom operations
#[derive(Error, Debug)]
pub enum StudioError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Catalog snapshot could not be parsed
    #[error("Catalog snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Wildcard tag file could not be parsed
    #[error("Wildcard file error: {0}")]
    WildcardFile(#[from] serde_yaml::Error),

    /// Buffer has no backing file to save to
    #[error("No file path set")]
    NoFilePath,

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for promptloom operations
pub type Result<T> = std::result::Result<T, StudioError>;

/// Convert anyhow::Error to StudioError
impl From<anyhow::Error> for StudioError {
    fn from(err: anyhow::Error) -> Self {
        StudioError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StudioError::NoFilePath;
        assert_eq!(err.to_string(), "No file path set");
    }

    #[test]
    fn test_snapshot_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: StudioError = parse_err.into();
        assert!(matches!(err, StudioError::Snapshot(_)));
    }
}
