//! Error types for loomwright.
//!
//! The loom engine itself never fails: out-of-range edits are no-ops. These
//! errors belong to the surfaces around it (drawdown parsing, configuration,
//! loading serialized mechanizations, the CLI).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoomError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawdown parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid mechanization: {0}")]
    InvalidMechanization(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for LoomError {
    fn from(err: config::ConfigError) -> Self {
        LoomError::ConfigError(err.to_string())
    }
}

impl LoomError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LoomError::Parse {
            line,
            message: message.into(),
        }
    }
}
