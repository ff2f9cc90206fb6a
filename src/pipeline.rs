//! External setup commands.
//! Runs the commands that turn a freshly materialized tree into a usable
//! repository, one after another, stopping at the first failure.

use log::info;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::project::Project;

/// One external command of the setup pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    /// Human readable step name, used in progress lines and errors
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
}

impl CommandStep {
    pub fn new<L, P, I, A>(label: L, program: P, args: I) -> Self
    where
        L: Into<String>,
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            label: label.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The command line as typed in a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a command that could be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit status as reported by the OS
    pub status: String,
    /// stdout followed by stderr
    pub output: String,
}

/// Trait for executing setup commands.
pub trait CommandRunner {
    /// Runs `step` with `dir` as working directory and waits for it.
    ///
    /// Returns `Err` only when the command could not be started.
    fn run(&self, step: &CommandStep, dir: &Path) -> std::io::Result<CommandOutput>;
}

/// Runs commands as child processes of the generator.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, step: &CommandStep, dir: &Path) -> std::io::Result<CommandOutput> {
        let output = Command::new(&step.program).args(&step.args).current_dir(dir).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            output: combined,
        })
    }
}

/// The setup commands for a freshly materialized project: module init,
/// dependency tidy and version control init.
pub fn setup_steps(project: &Project) -> Vec<CommandStep> {
    vec![
        CommandStep::new("Initializing project", "go", ["mod", "init", project.module()]),
        CommandStep::new("Tidying project", "go", ["mod", "tidy"]),
        CommandStep::new("Initializing git repository", "git", ["init"]),
    ]
}

/// Runs `steps` in order inside `dir`.
///
/// # Errors
/// * `Error::SetupError` for the first step that cannot be started or exits
///   non-zero; later steps are not run
pub fn run_steps(runner: &dyn CommandRunner, steps: &[CommandStep], dir: &Path) -> Result<()> {
    for step in steps {
        info!("{}...", step.label);

        let output = runner.run(step, dir).map_err(|e| Error::SetupError {
            step: step.label.clone(),
            reason: format!("could not run '{}': {e}", step.command_line()),
            output: String::new(),
        })?;

        if !output.success {
            return Err(Error::SetupError {
                step: step.label.clone(),
                reason: format!("'{}' exited with {}", step.command_line(), output.status),
                output: output.output,
            });
        }

        info!("{} complete", step.label);
    }
    Ok(())
}
