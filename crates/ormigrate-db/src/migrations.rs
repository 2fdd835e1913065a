use std::fmt;
use std::sync::Arc;

use ormigrate_common::Result;
use rusqlite::Connection;

/// A deferred migration step, run by the migration runner against a connection.
pub type MigrationFn = Arc<dyn Fn(&Connection) -> Result<()> + Send + Sync>;

/// Wrap a closure as a [`MigrationFn`].
pub fn migration_fn<F>(f: F) -> MigrationFn
where
    F: Fn(&Connection) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A versioned pair of schema changes.
///
/// `name` is the version taken from the file name (e.g. `"00001"`) and
/// `comment` the slug that follows it. Either action may be missing when only
/// one of the `.up.sql` / `.down.sql` files exists.
#[derive(Clone, Default)]
pub struct Migration {
    pub name: String,
    pub comment: String,
    pub up: Option<MigrationFn>,
    pub down: Option<MigrationFn>,
}

impl Migration {
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            up: None,
            down: None,
        }
    }

    pub fn with_up<F>(mut self, f: F) -> Self
    where
        F: Fn(&Connection) -> Result<()> + Send + Sync + 'static,
    {
        self.up = Some(migration_fn(f));
        self
    }

    pub fn with_down<F>(mut self, f: F) -> Self
    where
        F: Fn(&Connection) -> Result<()> + Send + Sync + 'static,
    {
        self.down = Some(migration_fn(f));
        self
    }

    /// Apply the migration. A missing up action is a no-op.
    pub fn run_up(&self, conn: &Connection) -> Result<()> {
        match &self.up {
            Some(f) => f(conn),
            None => Ok(()),
        }
    }

    /// Revert the migration. A missing down action is a no-op.
    pub fn run_down(&self, conn: &Connection) -> Result<()> {
        match &self.down {
            Some(f) => f(conn),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("name", &self.name)
            .field("comment", &self.comment)
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .finish()
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.name, self.comment)
    }
}
