//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::LoomError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &LoomError) -> String {
    match e {
        LoomError::Parse { .. } => format!("{}\nhint: use x/#/1 for up, ./-/0 for down, ? for unset", e),
        _ => e.to_string(),
    }
}
