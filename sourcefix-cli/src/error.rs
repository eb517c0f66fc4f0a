//! Error types for the sourcefix CLI.
//!
//! This module distinguishes between:
//! - Content invalidity (exit code 1): the source was analyzed and error
//!   findings block validity.
//! - Runtime errors (exit code 2): I/O failures, bad arguments. These abort
//!   before any finding is produced and are never conflated with content
//!   findings.

use thiserror::Error;

/// The top-level error type for CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The source failed validation (exit code 1).
    #[error("validation failed: {errors} error finding(s) in {file}")]
    Invalid { file: String, errors: u64 },

    /// A runtime/tool error occurred (exit code 2).
    /// This includes I/O errors and invalid arguments.
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

impl CliError {
    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Invalid { .. } => 1,
            CliError::Runtime(_) => 2,
        }
    }
}
