use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ormigrate_common::{Error, Result};
use walkdir::WalkDir;

/// A single entry found while walking a [`FileTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// `/`-separated path relative to the tree root.
    pub path: String,
    pub is_dir: bool,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Read-only view of a tree of files that migrations can be discovered from.
///
/// Paths passed to and returned from a tree are relative to its root and use
/// `/` as the separator.
pub trait FileTree: Send + Sync {
    /// Every entry below the root, recursively, in lexical path order.
    fn walk(&self) -> Result<Vec<TreeEntry>>;

    /// Full contents of the file at `path`.
    fn read_to_string(&self, path: &str) -> Result<String>;
}

impl<T: FileTree + ?Sized> FileTree for Arc<T> {
    fn walk(&self) -> Result<Vec<TreeEntry>> {
        (**self).walk()
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        (**self).read_to_string(path)
    }
}

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileTree for DirTree {
    fn walk(&self) -> Result<Vec<TreeEntry>> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry
                .map_err(|e| Error::Walk(format!("{}: {e}", self.root.display())))?;

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| Error::Walk(format!("{}: {e}", entry.path().display())))?;
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            entries.push(TreeEntry {
                path,
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(full.display().to_string()),
            _ => Error::Io(e),
        })
    }
}

/// An in-memory tree, for tests and for migrations compiled into the binary
/// with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<String, String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_static(files: &[(&'static str, &'static str)]) -> Self {
        files
            .iter()
            .fold(Self::new(), |tree, (path, contents)| tree.with_file(*path, *contents))
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        let path = path.into();
        let path = path.trim_start_matches("./").trim_start_matches('/').to_string();
        self.files.insert(path, contents.into());
    }
}

impl FileTree for MemoryTree {
    fn walk(&self) -> Result<Vec<TreeEntry>> {
        let mut dirs = BTreeSet::new();
        for path in self.files.keys() {
            let mut end = 0;
            while let Some(pos) = path[end..].find('/') {
                end += pos;
                dirs.insert(path[..end].to_string());
                end += 1;
            }
        }

        let mut entries: Vec<TreeEntry> = dirs
            .into_iter()
            .map(TreeEntry::dir)
            .chain(self.files.keys().cloned().map(TreeEntry::file))
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }
}
