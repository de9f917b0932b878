//! Error types for noxcomb
//!
//! Provides structured error types with suggestions for common issues.
//!
//! Only a handful of conditions are hard failures: a missing noxfile, a nox
//! process that cannot be started, and configuration problems. Everything
//! else (an output declaration that doesn't match, a temp file that cannot
//! be read or removed, a non-zero nox exit) is logged and degrades to a
//! possibly incomplete report.

use thiserror::Error;

/// Result type for combine operations
pub type CombineResult<T> = Result<T, CombineError>;

/// Main error type for a combine run
#[derive(Error, Debug)]
pub enum CombineError {
    /// The noxfile to rewrite does not exist
    #[error("Nox file does not exist at {path}")]
    NoxfileNotFound { path: String },

    /// Failed to spawn the nox subprocess
    #[error("Failed to spawn command: {command}: {error}")]
    SpawnFailed {
        command: String,
        error: String,
        suggestion: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Suggest fixes for common error patterns
pub fn suggest_fix(command: &str, error: &str) -> Option<String> {
    // Spawn failures for a missing runner
    if error.contains("No such file") || error.contains("not found") {
        if command.contains("nox") {
            return Some("'nox' command not found. Install nox: pip install nox".to_string());
        }
        return Some("Required command not found. Check PATH and dependencies.".to_string());
    }

    // Permission errors
    if error.contains("Permission denied") {
        return Some(
            "Permission denied. Check file permissions or run with appropriate access.".to_string(),
        );
    }

    None
}
