//! Command-line interface implementation for gog.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{default_error_handler, Error};

/// Command-line arguments structure for gog.
#[derive(Parser, Debug)]
#[command(author, version, about = "gog is a tool for generating Go projects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    #[command(visible_alias = "n")]
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Name of the project, also the last segment of its module path
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory to create the project in (defaults to ./NAME, use . for the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Owner or organisation placed in the module path (github.com/OWNER/NAME)
    #[arg(short = 'u', long = "username", visible_alias = "repo", value_name = "OWNER")]
    pub username: Option<String>,

    /// Use a template directory on disk instead of the built-in template
    #[arg(short, long, value_name = "TEMPLATE_DIR")]
    pub template: Option<PathBuf>,

    /// Write into an existing non-empty directory without asking
    #[arg(short, long)]
    pub force: bool,
}

/// The command used to print help when required arguments are missing.
pub fn help_command() -> clap::Command {
    Args::command().help_template(
        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
    )
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                    | ErrorKind::MissingSubcommand
            ) {
                if let Err(err) = help_command().print_help() {
                    default_error_handler(Error::IoError(err));
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
