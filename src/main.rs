//! gog's main application entry point.
//! Parses the command line, builds the project description and hands it to
//! the generator.

use gog::{
    cli::{get_args, Commands, NewArgs},
    error::{default_error_handler, Result},
    generator::{confirm_overwrite, Generator},
    logger::init_logger,
    pipeline::SystemRunner,
    project::Project,
    prompt::DialoguerPrompter,
    store::{DirStore, EmbeddedStore, TemplateStore},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    let result = match args.command {
        Commands::New(new_args) => run_new(new_args),
    };

    if let Err(err) = result {
        default_error_handler(err);
    }
}

/// Runs the `new` command.
///
/// # Flow
/// 1. Validates the name and owner and resolves the target directory
/// 2. Picks the built-in template or the one given with `--template`
/// 3. Asks before writing into an existing non-empty directory
/// 4. Generates the project and prints how to start it
fn run_new(args: NewArgs) -> Result<()> {
    let mut project = Project::new(args.name, args.directory, args.username)?;

    let store: Box<dyn TemplateStore> = match &args.template {
        Some(dir) => {
            project = project.with_template_root("");
            Box::new(DirStore::new(dir)?)
        }
        None => Box::new(EmbeddedStore::default_template()),
    };

    let prompt = DialoguerPrompter::new();
    confirm_overwrite(&prompt, &project, args.force)?;

    let runner = SystemRunner::new();
    Generator::new(&*store, &runner).create(&project)?;

    println!("\n  To get started, run:\n");
    if !project.is_current_dir() {
        println!("  cd {}", project.target_dir().display());
    }
    println!("  just serve\n");
    Ok(())
}
