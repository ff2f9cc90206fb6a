//! Project description.
//! Holds everything a single generator invocation needs to know about the
//! project being created. Built once, never mutated afterwards.

use crate::constants::{
    CURRENT_DIR_SENTINELS, MODULE_PLACEHOLDER, NAME_PLACEHOLDER, TEMPLATE_ROOT,
};
use crate::error::{Error, Result};
use crate::substitution::{resolve_module_identity, resolve_substitutions, Substitutions};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("identifier pattern is valid")
    })
}

/// Checks that `value` can be used as a module path segment.
///
/// Rejecting values that contain a placeholder keeps substitution idempotent
/// only where template placeholders are delimited by characters that cannot
/// appear in a name (quotes, `/`, spaces, ...). A template with text such as
/// `PROJECT_NAMEE` can still form a new token from a name like `PROJECT_NAM`.
///
/// # Errors
/// * `Error::ValidationError` if the value is empty, contains characters other
///   than ASCII letters, digits, `.`, `_` and `-`, or contains a placeholder
pub fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::ValidationError(format!("{kind} must not be empty")));
    }
    if !identifier_pattern().is_match(value) {
        return Err(Error::ValidationError(format!(
            "{kind} '{value}' may only contain letters, digits, '.', '_' and '-' and must start with a letter or digit"
        )));
    }
    if value.contains(NAME_PLACEHOLDER) || value.contains(MODULE_PLACEHOLDER) {
        return Err(Error::ValidationError(format!(
            "{kind} '{value}' must not contain the placeholder '{NAME_PLACEHOLDER}'"
        )));
    }
    Ok(())
}

/// Returns true for the directory arguments that mean "write in place".
pub fn is_current_dir<P: AsRef<Path>>(dir: P) -> bool {
    dir.as_ref().to_str().is_some_and(|d| CURRENT_DIR_SENTINELS.contains(&d))
}

/// A project to generate.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    owner: Option<String>,
    module: String,
    target_dir: PathBuf,
    template_root: PathBuf,
    substitutions: Substitutions,
}

impl Project {
    /// Creates a new project.
    ///
    /// # Arguments
    /// * `name` - Project name, also the last module path segment
    /// * `directory` - Target directory; `./<name>` when `None`,
    ///   the working directory itself when `.` or `./`
    /// * `owner` - Optional namespace inserted between host and name
    ///
    /// # Errors
    /// * `Error::ValidationError` if the name or a non-empty owner is invalid
    pub fn new<S: Into<String>>(
        name: S,
        directory: Option<PathBuf>,
        owner: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        validate_identifier("project name", &name)?;

        let owner = owner.filter(|o| !o.is_empty());
        if let Some(owner) = &owner {
            validate_identifier("owner", owner)?;
        }

        let module = resolve_module_identity(&name, owner.as_deref());
        let substitutions = resolve_substitutions(&name, &module)?;
        let target_dir = match directory {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => PathBuf::from(&name),
        };

        Ok(Self {
            name,
            owner,
            module,
            target_dir,
            template_root: PathBuf::from(TEMPLATE_ROOT),
            substitutions,
        })
    }

    /// Uses `root` as the template tree's location inside the store.
    pub fn with_template_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.template_root = root.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Fully-qualified module path, e.g. `github.com/acme/billing-service`.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn substitutions(&self) -> &Substitutions {
        &self.substitutions
    }

    pub fn is_current_dir(&self) -> bool {
        is_current_dir(&self.target_dir)
    }
}
