use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gog::constants::{ENV_EXAMPLE_FILE, ENV_FILE, TEMPLATE_ROOT};
use gog::error::Error;
use gog::generator::Generator;
use gog::pipeline::{CommandOutput, CommandRunner, CommandStep};
use gog::processor::scan_residual_placeholders;
use gog::project::Project;
use gog::store::{DirStore, EmbeddedStore, TemplateStore};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Records the steps it is asked to run; fails the step with the given label.
#[derive(Default)]
struct RecordingRunner {
    steps: RefCell<Vec<CommandStep>>,
    fail: Option<&'static str>,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, step: &CommandStep, _dir: &Path) -> io::Result<CommandOutput> {
        self.steps.borrow_mut().push(step.clone());
        let success = self.fail != Some(step.label.as_str());
        Ok(CommandOutput {
            success,
            status: String::from(if success { "exit status: 0" } else { "exit status: 1" }),
            output: String::from("go: downloading failed"),
        })
    }
}

/// Relative paths of every entry under `root` in the embedded template.
fn embedded_paths(store: &EmbeddedStore) -> BTreeSet<PathBuf> {
    let root = Path::new(TEMPLATE_ROOT);
    let mut paths = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in store.list_entries(&dir).unwrap() {
            paths.insert(entry.path.strip_prefix(root).unwrap().to_path_buf());
            if entry.is_dir() {
                stack.push(entry.path);
            }
        }
    }
    paths
}

fn disk_paths(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

#[test_log::test]
fn test_billing_service_scenario() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("billing-service");
    let project =
        Project::new("billing-service", Some(target.clone()), Some("acme".into())).unwrap();
    let store = EmbeddedStore::default_template();
    let runner = RecordingRunner::default();

    Generator::new(&store, &runner).create(&project).unwrap();

    assert_eq!(project.module(), "github.com/acme/billing-service");

    let main_go = fs::read_to_string(target.join("main.go")).unwrap();
    assert!(main_go.contains("\"github.com/acme/billing-service/cmd/serve\""));
    assert!(main_go.contains("usage: billing-service serve"));

    let readme = fs::read_to_string(target.join("README.md")).unwrap();
    assert!(readme.starts_with("# billing-service"));

    let written: Vec<PathBuf> = WalkDir::new(&target)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    assert!(scan_residual_placeholders(&written, project.substitutions()).is_empty());

    // Template structure plus the bootstrapped .env and nothing else.
    let mut expected = embedded_paths(&store);
    expected.insert(PathBuf::from(ENV_FILE));
    assert_eq!(disk_paths(&target), expected);

    assert_eq!(
        fs::read(target.join(ENV_FILE)).unwrap(),
        fs::read(target.join(ENV_EXAMPLE_FILE)).unwrap()
    );

    let steps = runner.steps.borrow();
    let lines: Vec<String> = steps.iter().map(CommandStep::command_line).collect();
    assert_eq!(
        lines,
        vec!["go mod init github.com/acme/billing-service", "go mod tidy", "git init"]
    );
}

#[test]
fn test_existing_env_survives_generation() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join(ENV_FILE), "SECRET=keep\n").unwrap();

    let project = Project::new("svc", Some(out.path().to_path_buf()), None).unwrap();
    let store = EmbeddedStore::default_template();
    let runner = RecordingRunner::default();

    Generator::new(&store, &runner).create(&project).unwrap();

    assert_eq!(fs::read_to_string(out.path().join(ENV_FILE)).unwrap(), "SECRET=keep\n");
}

#[test]
fn test_missing_env_example_stops_before_setup() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("main.go"), "package main // PROJECT_NAME\n").unwrap();

    let out = TempDir::new().unwrap();
    let project = Project::new("svc", Some(out.path().join("svc")), None)
        .unwrap()
        .with_template_root("");
    let store = DirStore::new(template.path()).unwrap();
    let runner = RecordingRunner::default();

    let result = Generator::new(&store, &runner).create(&project);

    assert!(matches!(result, Err(Error::TemplateError { .. })));
    assert!(runner.steps.borrow().is_empty());
    // Materialized files are not rolled back.
    assert_eq!(
        fs::read_to_string(out.path().join("svc/main.go")).unwrap(),
        "package main // svc\n"
    );
}

#[test]
fn test_failing_setup_step_is_reported() {
    let out = TempDir::new().unwrap();
    let project = Project::new("svc", Some(out.path().join("svc")), None).unwrap();
    let store = EmbeddedStore::default_template();
    let runner = RecordingRunner { fail: Some("Tidying project"), ..Default::default() };

    let result = Generator::new(&store, &runner).create(&project);

    assert_eq!(runner.steps.borrow().len(), 2);
    match result {
        Err(Error::SetupError { step, output, .. }) => {
            assert_eq!(step, "Tidying project");
            assert_eq!(output, "go: downloading failed");
        }
        other => panic!("Expected SetupError, got {other:?}"),
    }
}

#[test]
fn test_custom_steps_replace_defaults() {
    let out = TempDir::new().unwrap();
    let project = Project::new("svc", Some(out.path().join("svc")), None).unwrap();
    let store = EmbeddedStore::default_template();
    let runner = RecordingRunner::default();

    Generator::new(&store, &runner)
        .with_steps(vec![CommandStep::new("Initializing git repository", "git", ["init"])])
        .create(&project)
        .unwrap();

    assert_eq!(runner.steps.borrow().len(), 1);
}

#[test]
fn test_unrelated_files_in_target_are_ignored() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("svc");
    fs::create_dir_all(target.join("notes")).unwrap();
    // Not written by the generator, so never reported as a leftover.
    fs::write(target.join("notes/todo.txt"), "rename PROJECT_NAME later\n").unwrap();

    let project = Project::new("svc", Some(target.clone()), None).unwrap();
    let store = EmbeddedStore::default_template();
    let runner = RecordingRunner::default();

    Generator::new(&store, &runner).create(&project).unwrap();

    assert!(target.join(ENV_FILE).exists());
    assert_eq!(runner.steps.borrow().len(), 3);
    assert_eq!(
        fs::read_to_string(target.join("notes/todo.txt")).unwrap(),
        "rename PROJECT_NAME later\n"
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_in_target_is_ignored() {
    use std::os::unix::fs::PermissionsExt;

    let out = TempDir::new().unwrap();
    let target = out.path().join("svc");
    let private = target.join("notes/private.txt");
    fs::create_dir_all(private.parent().unwrap()).unwrap();
    fs::write(&private, "secret").unwrap();
    fs::set_permissions(&private, fs::Permissions::from_mode(0o000)).unwrap();

    let project = Project::new("svc", Some(target.clone()), None).unwrap();
    let store = EmbeddedStore::default_template();
    let runner = RecordingRunner::default();

    let result = Generator::new(&store, &runner).create(&project);

    fs::set_permissions(&private, fs::Permissions::from_mode(0o600)).unwrap();
    assert!(result.is_ok(), "{result:?}");
    assert!(target.join(ENV_FILE).exists());
    assert_eq!(runner.steps.borrow().len(), 3);
}
