//! Project generation orchestration.
//! Runs materialization, environment bootstrapping and the setup pipeline in
//! order. Each step must succeed before the next one starts.

use log::{debug, info, warn};
use std::fs;

use crate::env::bootstrap_env;
use crate::error::{Error, Result};
use crate::pipeline::{run_steps, setup_steps, CommandRunner, CommandStep};
use crate::processor::{scan_residual_placeholders, Materializer};
use crate::project::Project;
use crate::prompt::Prompter;
use crate::store::TemplateStore;

/// Asks before generating into an existing, non-empty directory.
///
/// Writing in place (`.`) never asks. Returns `Error::AbortedError` when the
/// user declines.
pub fn confirm_overwrite(prompt: &dyn Prompter, project: &Project, force: bool) -> Result<()> {
    if project.is_current_dir() {
        return Ok(());
    }

    let dir = project.target_dir();
    let non_empty = match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    };
    if !non_empty {
        return Ok(());
    }

    let confirmed = prompt.confirm(
        force,
        format!(
            "Directory '{}' is not empty. Existing files may be overwritten. Continue?",
            dir.display()
        ),
    )?;
    if confirmed {
        Ok(())
    } else {
        Err(Error::AbortedError)
    }
}

/// Generates projects from a template store.
pub struct Generator<'a> {
    store: &'a dyn TemplateStore,
    runner: &'a dyn CommandRunner,
    steps: Option<Vec<CommandStep>>,
}

impl<'a> Generator<'a> {
    pub fn new(store: &'a dyn TemplateStore, runner: &'a dyn CommandRunner) -> Self {
        Self { store, runner, steps: None }
    }

    /// Replaces the default setup commands.
    pub fn with_steps(mut self, steps: Vec<CommandStep>) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Creates `project`.
    ///
    /// # Flow
    /// 1. Materializes the template under the target directory
    /// 2. Creates `.env` from `.env.example` if missing
    /// 3. Runs the setup commands inside the target directory
    ///
    /// # Errors
    /// Returns the first error; nothing written before it is removed.
    pub fn create(&self, project: &Project) -> Result<()> {
        info!("Creating new project '{}'", project.name());
        debug!("Module identity: {}", project.module());

        info!("Creating files...");
        let report = Materializer::new(self.store).materialize(project)?;
        debug!("Wrote {} files in {} directories", report.files.len(), report.dirs);

        let residual = scan_residual_placeholders(&report.files, project.substitutions());
        if !residual.is_empty() {
            warn!("{} file(s) still contain placeholders", residual.len());
        }

        bootstrap_env(project.target_dir())?;

        let steps = self.steps.clone().unwrap_or_else(|| setup_steps(project));
        run_steps(self.runner, &steps, project.target_dir())?;

        info!("Project created successfully!");
        Ok(())
    }
}
