// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Every variant here is fatal for the invocation that produced it. Normal
//! "nothing to do" terminations are modelled by [`crate::outcome::Outcome`]
//! instead, so callers never have to inspect an error to find out whether
//! something actually went wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Record store error: {0}")]
    StoreError(String),

    #[error("Publish error: {0}")]
    PublishError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelayError {
    /// Process exit code for this failure category.
    ///
    /// Successful outcomes (including skipped and ignored events) always exit
    /// with 0, so every value returned here is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            RelayError::ConfigError(_) | RelayError::TomlError(_) => 2,
            RelayError::ValidationFailed(_) | RelayError::JsonError(_) => 3,
            RelayError::StoreError(_) | RelayError::PublishError(_) => 4,
            RelayError::IoError(_) | RelayError::Other(_) => 1,
        }
    }

    /// Short machine-friendly label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::ConfigError(_) | RelayError::TomlError(_) => "config",
            RelayError::ValidationFailed(_) | RelayError::JsonError(_) => "validation",
            RelayError::StoreError(_) => "store",
            RelayError::PublishError(_) => "publish",
            RelayError::IoError(_) => "io",
            RelayError::Other(_) => "other",
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_category_and_never_zero() {
        let config = RelayError::ConfigError("x".into()).exit_code();
        let validation = RelayError::ValidationFailed("x".into()).exit_code();
        let store = RelayError::StoreError("x".into()).exit_code();
        let publish = RelayError::PublishError("x".into()).exit_code();

        assert_ne!(config, validation);
        assert_ne!(validation, store);
        assert_eq!(store, publish);
        for code in [config, validation, store, publish] {
            assert_ne!(code, 0);
        }
    }
}
