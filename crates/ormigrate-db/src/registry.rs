use std::cmp::Ordering;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ormigrate_common::Result;
use ormigrate_config::MigrationsConfig;
use tracing::{debug, info};

use crate::migrations::{Migration, MigrationFn};
use crate::naming::{MigrationKind, extract_migration_name, version_number};
use crate::sql::sql_migration_fn;
use crate::tree::{DirTree, FileTree};

/// Registry of migrations, unique by version.
///
/// Entries come from [`discover`](Self::discover)ing SQL files and from
/// [`register`](Self::register)ing closures. Both merge into the same entry
/// when they share a version. Entries are never removed.
pub struct Migrations {
    ms: Vec<Migration>,
    explicit_directory: Option<PathBuf>,
    implicit_directory: PathBuf,
}

impl Default for Migrations {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl Migrations {
    /// Create an empty registry. The directory of the calling source file
    /// becomes the default discovery root.
    #[track_caller]
    pub fn new() -> Self {
        Self {
            ms: Vec::new(),
            explicit_directory: None,
            implicit_directory: source_dir(Location::caller().file()),
        }
    }

    #[track_caller]
    pub fn from_config(config: &MigrationsConfig) -> Self {
        let mut migrations = Self::new();
        migrations.explicit_directory = config.directory.clone();
        migrations
    }

    /// Discover from `directory` instead of the caller's source directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.explicit_directory = Some(directory.into());
        self
    }

    pub fn directory(&self) -> &Path {
        self.explicit_directory
            .as_deref()
            .unwrap_or(&self.implicit_directory)
    }

    pub fn len(&self) -> usize {
        self.ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ms.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Migration> {
        self.ms.iter().find(|m| m.name == name)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Migration> {
        self.ms.iter()
    }

    /// A copy of every migration, ascending by numeric version.
    pub fn sorted(&self) -> Vec<Migration> {
        let mut migrations = self.ms.clone();
        migrations.sort_by(|a, b| compare_versions(&a.name, &b.name));
        migrations
    }

    /// Insert `migration`, merging into an existing entry with the same name.
    ///
    /// On merge the comment is replaced, and `up`/`down` are replaced only
    /// when the incoming migration has them.
    ///
    /// # Panics
    ///
    /// Panics if `migration.name` is empty.
    pub fn add(&mut self, migration: Migration) {
        if migration.name.is_empty() {
            panic!("migration name is required");
        }

        match self.ms.iter_mut().find(|m| m.name == migration.name) {
            Some(existing) => {
                existing.comment = migration.comment;
                if migration.up.is_some() {
                    existing.up = migration.up;
                }
                if migration.down.is_some() {
                    existing.down = migration.down;
                }
            }
            None => self.ms.push(migration),
        }
    }

    /// Register a migration named after the calling source file, which must
    /// follow `<version>_<slug>.rs`.
    #[track_caller]
    pub fn register(&mut self, up: Option<MigrationFn>, down: Option<MigrationFn>) -> Result<()> {
        let file = Location::caller().file();
        let (name, comment) = extract_migration_name(file)?;

        debug!("registering migration {name}_{comment} from {file}");
        self.add(Migration {
            name,
            comment,
            up,
            down,
        });
        Ok(())
    }

    /// [`register`](Self::register), panicking on a malformed file name.
    #[track_caller]
    pub fn must_register(&mut self, up: Option<MigrationFn>, down: Option<MigrationFn>) {
        if let Err(e) = self.register(up, down) {
            panic!("{e}");
        }
    }

    /// Walk `tree` and bind every `.up.sql` / `.down.sql` file to the migration
    /// named by its version.
    ///
    /// A file name outside the naming grammar aborts the walk. Migrations
    /// bound before the failure stay registered.
    pub fn discover<T: FileTree + 'static>(&mut self, tree: T) -> Result<()> {
        self.discover_shared(Arc::new(tree))
    }

    pub fn discover_shared(&mut self, tree: Arc<dyn FileTree>) -> Result<()> {
        let mut bound = 0usize;

        for entry in tree.walk()? {
            if entry.is_dir {
                continue;
            }
            let Some(kind) = MigrationKind::from_path(&entry.path) else {
                debug!("skipping non-migration file {}", entry.path);
                continue;
            };

            let (name, comment) = extract_migration_name(&entry.path)?;
            let action = sql_migration_fn(Arc::clone(&tree), entry.path.as_str());

            let migration = self.get_or_create(&name);
            migration.comment = comment;
            match kind {
                MigrationKind::Up => migration.up = Some(action),
                MigrationKind::Down => migration.down = Some(action),
            }

            debug!("bound {} as {kind:?} for migration {name}", entry.path);
            bound += 1;
        }

        info!(
            "discovered {bound} migration files, {} migrations registered",
            self.ms.len()
        );
        Ok(())
    }

    /// Discover from [`directory`](Self::directory) on disk.
    pub fn discover_directory(&mut self) -> Result<()> {
        let root = self.directory().to_path_buf();
        info!("discovering migrations in {}", root.display());
        self.discover(DirTree::new(root))
    }

    /// Discover from the directory of the calling source file.
    #[track_caller]
    pub fn discover_caller(&mut self) -> Result<()> {
        let root = source_dir(Location::caller().file());
        info!("discovering migrations in {}", root.display());
        self.discover(DirTree::new(root))
    }

    fn get_or_create(&mut self, name: &str) -> &mut Migration {
        let idx = match self.ms.iter().position(|m| m.name == name) {
            Some(idx) => idx,
            None => {
                self.ms.push(Migration::new(name, ""));
                self.ms.len() - 1
            }
        };
        &mut self.ms[idx]
    }
}

/// Numeric versions ascending, then by string. Non-numeric names sort last.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (version_number(a), version_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Directory holding a source file recorded by `Location::file`.
///
/// rustc records paths relative to where cargo invoked it (the workspace
/// root for workspace members), so relative paths are resolved against the
/// working directory and its ancestors.
fn source_dir(file: &str) -> PathBuf {
    let file = Path::new(file);
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if file.is_absolute() {
        return dir;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for base in cwd.ancestors() {
            if base.join(file).is_file() {
                return base.join(&dir);
            }
        }
    }
    dir
}
