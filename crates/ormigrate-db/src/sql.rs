use std::sync::Arc;

use ormigrate_common::Error;
use tracing::debug;

use crate::migrations::{MigrationFn, migration_fn};
use crate::tree::FileTree;

/// An action that reads `path` from `tree` when invoked and executes the
/// whole file as one batch.
///
/// The file is read at call time, not at discovery time.
pub fn sql_migration_fn(tree: Arc<dyn FileTree>, path: impl Into<String>) -> MigrationFn {
    let path = path.into();
    migration_fn(move |conn| {
        let sql = tree.read_to_string(&path)?;
        if sql.trim().is_empty() {
            debug!("skipping empty migration file {path}");
            return Ok(());
        }

        debug!("executing migration file {path}");
        conn.execute_batch(&sql)
            .map_err(|e| Error::Database(format!("migration {path} failed: {e}")))
    })
}
