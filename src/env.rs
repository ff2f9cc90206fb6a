//! Environment file bootstrapping.

use log::info;
use std::fs;
use std::path::Path;

use crate::constants::{ENV_EXAMPLE_FILE, ENV_FILE};
use crate::error::{Error, Result};

/// What [`bootstrap_env`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvOutcome {
    /// The live file was created from the example
    Created,
    /// A live file already existed and was left untouched
    Kept,
}

/// Creates `.env` from `.env.example` inside `dir` unless `.env` exists.
///
/// # Errors
/// * `Error::TemplateError` if the example file is missing or unreadable
/// * `Error::WriteError` if the live file cannot be written
pub fn bootstrap_env<P: AsRef<Path>>(dir: P) -> Result<EnvOutcome> {
    let dir = dir.as_ref();
    let example = dir.join(ENV_EXAMPLE_FILE);
    let live = dir.join(ENV_FILE);

    let content = fs::read(&example).map_err(|e| Error::TemplateError {
        path: example.display().to_string(),
        reason: format!("failed to read {ENV_EXAMPLE_FILE}: {e}"),
    })?;

    if live.exists() {
        info!("Keeping existing '{}'", live.display());
        return Ok(EnvOutcome::Kept);
    }

    fs::write(&live, content)
        .map_err(|e| Error::WriteError { path: live.display().to_string(), source: e })?;
    info!("Created '{}' from {ENV_EXAMPLE_FILE}", live.display());

    Ok(EnvOutcome::Created)
}
