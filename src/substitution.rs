//! Placeholder substitution.
//! Resolves the project's module identity and turns it into an ordered list
//! of literal token replacements applied to every template file.

use crate::constants::{MODULE_HOST, MODULE_PLACEHOLDER, NAME_PLACEHOLDER};
use crate::error::{Error, Result};
use regex::bytes::{NoExpand, Regex};

/// Replaces every literal occurrence of a token with a fixed value.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    token: String,
    replacement: String,
    matcher: Regex,
}

impl SubstitutionRule {
    /// Creates a new rule.
    ///
    /// # Errors
    /// * `Error::ValidationError` if `token` is empty
    pub fn new<T: Into<String>, R: Into<String>>(token: T, replacement: R) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::ValidationError("substitution token must not be empty".into()));
        }
        let matcher = Regex::new(&regex::escape(&token))
            .map_err(|e| Error::ValidationError(e.to_string()))?;

        Ok(Self { token, replacement: replacement.into(), matcher })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Applies this rule to raw file bytes.
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        self.matcher.replace_all(content, NoExpand(self.replacement.as_bytes())).into_owned()
    }
}

/// An ordered list of substitution rules.
///
/// A token that is a substring of another token is always applied after it,
/// otherwise the shorter token would eat part of the longer one first.
#[derive(Debug, Clone)]
pub struct Substitutions {
    rules: Vec<SubstitutionRule>,
}

impl Substitutions {
    /// Creates the rule list, keeping the given order.
    ///
    /// # Errors
    /// * `Error::SubstitutionOrderError` if a rule's token occurs inside the
    ///   token of any rule after it
    pub fn new(rules: Vec<SubstitutionRule>) -> Result<Self> {
        for (i, earlier) in rules.iter().enumerate() {
            if let Some(later) =
                rules[i + 1..].iter().find(|later| later.token.contains(&earlier.token))
            {
                return Err(Error::SubstitutionOrderError {
                    earlier: earlier.token.clone(),
                    later: later.token.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Tokens in application order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(SubstitutionRule::token)
    }

    /// Applies every rule in order.
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        self.rules.iter().fold(content.to_vec(), |data, rule| rule.apply(&data))
    }

    /// Returns true if `content` still contains any of the tokens.
    pub fn has_residual(&self, content: &[u8]) -> bool {
        self.rules.iter().any(|rule| rule.matcher.is_match(content))
    }
}

/// Computes the module identity: `host/owner/name`, or `host/name` when the
/// owner is absent or empty.
pub fn resolve_module_identity(name: &str, owner: Option<&str>) -> String {
    match owner.filter(|o| !o.is_empty()) {
        Some(owner) => format!("{MODULE_HOST}/{owner}/{name}"),
        None => format!("{MODULE_HOST}/{name}"),
    }
}

/// Builds the rules for a project: the module path placeholder first, then
/// the bare project name placeholder.
pub fn resolve_substitutions(name: &str, module: &str) -> Result<Substitutions> {
    Substitutions::new(vec![
        SubstitutionRule::new(MODULE_PLACEHOLDER, module)?,
        SubstitutionRule::new(NAME_PLACEHOLDER, name)?,
    ])
}
