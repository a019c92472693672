//! Error types for the CLI

use sauce_probe::ProbeError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// One or more scenarios failed
    #[error("{failed} of {total} tests failed")]
    TestsFailed {
        /// Failed test count
        failed: usize,
        /// Executed test count
        total: usize,
    },

    /// The binary was built without a browser backend
    #[error("this build has no browser support; rebuild with `--features browser`")]
    BrowserUnavailable,

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Library error
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tests_failed_message() {
        let err = CliError::TestsFailed {
            failed: 2,
            total: 9,
        };
        assert_eq!(err.to_string(), "2 of 9 tests failed");
    }

    #[test]
    fn test_probe_error_is_transparent() {
        let err: CliError = ProbeError::UnknownProduct {
            key: "sauce-labs-hat".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown product key 'sauce-labs-hat'");
    }

    #[test]
    fn test_config_helper() {
        assert!(matches!(CliError::config("x"), CliError::Config { .. }));
    }
}
