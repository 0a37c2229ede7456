//! Configuration System
//!
//! Layered configuration for the loom engine and the CLI: built-in defaults,
//! the user's global config file, workspace config files, then
//! `LOOMWRIGHT__*` environment variables. Tests included.

use crate::error::LoomError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoomwrightConfig {
    /// Loom engine settings
    #[serde(default)]
    pub loom: LoomSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loom engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoomSettings {
    /// Frames the loom always keeps, even when unused
    #[serde(default = "default_min_frames")]
    pub min_frames: usize,

    /// Treadles the loom always keeps, even when unused
    #[serde(default = "default_min_treadles")]
    pub min_treadles: usize,

    /// Compact frames and treadles after mechanizing a drawdown
    #[serde(default = "default_true")]
    pub compact: bool,
}

fn default_min_frames() -> usize {
    8
}

fn default_min_treadles() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for LoomSettings {
    fn default() -> Self {
        Self {
            min_frames: default_min_frames(),
            min_treadles: default_min_treadles(),
            compact: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Loom(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Loom(msg) => write!(f, "Loom: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl LoomSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_frames == 0 {
            return Err("min_frames must be at least 1".to_string());
        }
        if self.min_treadles == 0 {
            return Err("min_treadles must be at least 1".to_string());
        }
        Ok(())
    }
}

impl LoomwrightConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.loom.validate() {
            errors.push(ValidationError::Loom(e));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "unknown format '{}'",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr" | "file") {
            errors.push(ValidationError::Logging(format!(
                "unknown output '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every error into one `LoomError`.
    pub fn ensure_valid(&self) -> Result<(), LoomError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            LoomError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
