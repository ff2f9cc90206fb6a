//! Template materialization.
//! Walks a template store depth-first and writes every file, with placeholders
//! substituted, under the project's target directory.

use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::project::Project;
use crate::store::TemplateStore;
use crate::substitution::Substitutions;

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::WriteError { path: path.display().to_string(), source }
}

/// Creates `path` and any missing parents.
///
/// An existing directory is fine, anything else at `path` is an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::TargetNotADirectoryError { path: path.display().to_string() }),
        Err(_) => fs::create_dir_all(path).map_err(|e| write_error(path, e)),
    }
}

/// Summary of a finished materialization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub dirs: usize,
    pub files: Vec<PathBuf>,
}

/// Copies a template tree into a project's target directory.
pub struct Materializer<'a> {
    store: &'a dyn TemplateStore,
}

impl<'a> Materializer<'a> {
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Self { store }
    }

    /// Maps a store path under `template_root` to its target path.
    fn target_path(&self, project: &Project, source: &Path) -> Result<PathBuf> {
        let relative = source.strip_prefix(project.template_root()).map_err(|e| {
            Error::TemplateError { path: source.display().to_string(), reason: e.to_string() }
        })?;
        Ok(project.target_dir().join(relative))
    }

    /// Writes one file, overwriting whatever is at the target.
    fn write_file(&self, project: &Project, source: &Path, target: &Path) -> Result<()> {
        let content = self.store.read_file(source)?;
        let content = project.substitutions().apply(&content);
        fs::write(target, content).map_err(|e| write_error(target, e))
    }

    /// Materializes the template into the project's target directory.
    ///
    /// The walk is depth-first with an explicit stack. Directories are created
    /// idempotently, files are substituted and overwritten. The first error
    /// stops the walk; files already written stay on disk.
    pub fn materialize(&self, project: &Project) -> Result<MaterializeReport> {
        let mut report = MaterializeReport::default();

        ensure_dir(project.target_dir())?;

        let mut stack = vec![project.template_root().to_path_buf()];
        while let Some(dir) = stack.pop() {
            debug!("Listing template directory '{}'", dir.display());
            let entries = self.store.list_entries(&dir)?;

            let mut subdirs = Vec::new();
            for entry in entries {
                let target = self.target_path(project, &entry.path)?;
                if entry.is_dir() {
                    info!("  Creating directory '{}'", target.display());
                    ensure_dir(&target)?;
                    report.dirs += 1;
                    subdirs.push(entry.path);
                } else {
                    info!("  Creating file '{}'", target.display());
                    self.write_file(project, &entry.path, &target)?;
                    report.files.push(target);
                }
            }
            // Reversed so subdirectories are walked in listing order.
            stack.extend(subdirs.into_iter().rev());
        }

        Ok(report)
    }
}

/// Returns the files among `files` that still contain one of the tokens.
///
/// Only ever warns. A file that cannot be read is logged and skipped.
pub fn scan_residual_placeholders(files: &[PathBuf], substitutions: &Substitutions) -> Vec<PathBuf> {
    let mut residual = Vec::new();
    for path in files {
        match fs::read(path) {
            Ok(content) if substitutions.has_residual(&content) => {
                warn!("Unresolved placeholder left in '{}'", path.display());
                residual.push(path.clone());
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping placeholder check for '{}': {e}", path.display()),
        }
    }
    residual
}
