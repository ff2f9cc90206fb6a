//! Read-only template trees.
//! A template is handed to the materializer as a [`TemplateStore`] handle, so
//! the tree can come from the table compiled into the binary or from a
//! directory on disk.

use crate::error::{Error, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Kind of a template tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A single child of a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Path relative to the store root
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TemplateEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Trait for read-only template trees.
pub trait TemplateStore {
    /// Lists the direct children of `dir`, sorted by path.
    ///
    /// # Arguments
    /// * `dir` - Directory path relative to the store root
    ///
    /// # Errors
    /// * `Error::TemplateError` if `dir` does not exist or cannot be listed
    fn list_entries(&self, dir: &Path) -> Result<Vec<TemplateEntry>>;

    /// Reads the raw bytes of the file at `path`.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the file does not exist or cannot be read
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
}

fn template_error(path: &Path, reason: impl ToString) -> Error {
    Error::TemplateError { path: path.display().to_string(), reason: reason.to_string() }
}

/// Store backed by a static table of `(path, bytes)` pairs.
///
/// Directories are implied by the file paths. Paths use `/` separators.
pub struct EmbeddedStore {
    files: &'static [(&'static str, &'static [u8])],
}

macro_rules! embed {
    ($($path:literal),* $(,)?) => {
        &[$(
            (
                concat!("template/", $path),
                include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/template/", $path))
                    as &'static [u8],
            ),
        )*]
    };
}

/// The Go HTTP service template compiled into the binary.
static DEFAULT_TEMPLATE: &[(&str, &[u8])] = embed![
    ".env.example",
    ".gitignore",
    "README.md",
    "justfile",
    "main.go",
    "cmd/serve/serve.go",
    "internal/config/config.go",
    "internal/domains/health/handler.go",
];

impl EmbeddedStore {
    pub fn new(files: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { files }
    }

    /// Store holding the default template under
    /// [`TEMPLATE_ROOT`](crate::constants::TEMPLATE_ROOT).
    pub fn default_template() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Default for EmbeddedStore {
    fn default() -> Self {
        EmbeddedStore::default_template()
    }
}

impl TemplateStore for EmbeddedStore {
    fn list_entries(&self, dir: &Path) -> Result<Vec<TemplateEntry>> {
        let mut children = BTreeMap::new();
        let mut found = dir.as_os_str().is_empty();

        for (file, _) in self.files {
            let Ok(rest) = Path::new(file).strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(Component::Normal(first)) = components.next() else {
                continue;
            };
            found = true;
            let kind =
                if components.next().is_some() { EntryKind::Dir } else { EntryKind::File };
            children.insert(dir.join(first), kind);
        }

        if !found {
            return Err(template_error(dir, "no such directory"));
        }

        Ok(children.into_iter().map(|(path, kind)| TemplateEntry { path, kind }).collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .iter()
            .find(|(file, _)| Path::new(file) == path)
            .map(|(_, bytes)| bytes.to_vec())
            .ok_or_else(|| template_error(path, "no such file"))
    }
}

/// Store backed by a directory on the local filesystem.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Creates a new DirStore rooted at `root`.
    ///
    /// # Errors
    /// * `Error::TemplateError` if `root` is not an existing directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(template_error(root, "template directory does not exist"));
        }
        debug!("Using template directory '{}'.", root.display());
        Ok(Self { root: root.to_path_buf() })
    }
}

impl TemplateStore for DirStore {
    fn list_entries(&self, dir: &Path) -> Result<Vec<TemplateEntry>> {
        let full = self.root.join(dir);
        let read_dir = fs::read_dir(&full).map_err(|e| template_error(dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| template_error(dir, e))?;
            // Follows symlinks so a linked directory is walked like a real one.
            let metadata = fs::metadata(entry.path()).map_err(|e| template_error(dir, e))?;
            let kind = if metadata.is_dir() { EntryKind::Dir } else { EntryKind::File };
            entries.push(TemplateEntry { path: dir.join(entry.file_name()), kind });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(self.root.join(path)).map_err(|e| template_error(path, e))
    }
}
