//! gog generates Go service projects from a template tree.
//! It copies the template into a target directory, rewrites placeholder tokens
//! into the project's module path and name, and bootstraps the result into a
//! working repository.

/// Command-line interface module for the gog application
pub mod cli;

/// Common constants: placeholder tokens, file names, sentinels
pub mod constants;

/// `.env` bootstrapping from `.env.example`
pub mod env;

/// Error types and handling for the gog application
pub mod error;

/// Orchestrates a full project generation
pub mod generator;

/// Logger setup for the binary
pub mod logger;

/// External setup commands (module init, tidy, git init)
pub mod pipeline;

/// Template tree materialization
pub mod processor;

/// Project description and input validation
pub mod project;

/// User input and interaction handling
pub mod prompt;

/// Read-only template trees (embedded and on-disk)
pub mod store;

/// Ordered placeholder substitution rules
pub mod substitution;
