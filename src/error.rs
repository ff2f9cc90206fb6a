//! Error handling for gog.
//! Defines the error type and result alias used throughout the generator.

use std::io;
use thiserror::Error;

/// Custom error types for project generation.
///
/// Every failure aborts the remaining generation steps. Nothing written
/// before the failure is rolled back.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A template entry is missing, unreadable or malformed
    #[error("Template error in '{path}': {reason}.")]
    TemplateError { path: String, reason: String },

    /// A target file or directory could not be created or written
    #[error("Failed to write '{path}': {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The target path exists but is not a directory
    #[error("Target path '{path}' exists and is not a directory.")]
    TargetNotADirectoryError { path: String },

    /// An external setup command failed to start or exited non-zero
    #[error("{step} failed: {reason}\nOutput: {output}")]
    SetupError { step: String, reason: String, output: String },

    /// Represents validation failures in user input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// A substitution rule would be clobbered by an earlier, shorter rule
    #[error(
        "Substitution rule for '{earlier}' must not precede the rule for '{later}' which contains it."
    )]
    SubstitutionOrderError { earlier: String, later: String },

    /// The user declined to write into an existing directory
    #[error("Aborted by user.")]
    AbortedError,
}

/// Convenience type alias for Results with gog's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
