//! Discovery and registration of SQL schema migrations.
//!
//! Migration files are named `<version>_<slug>.up.sql` / `<version>_<slug>.down.sql`
//! and collected into a [`Migrations`] registry, which hands an ordered list of
//! [`Migration`]s to whatever runner applies them.

pub mod migrations;
pub mod naming;
pub mod registry;
pub mod sql;
pub mod tree;

pub use migrations::{Migration, MigrationFn};
pub use naming::{MigrationKind, extract_migration_name};
pub use registry::Migrations;
pub use tree::{DirTree, FileTree, MemoryTree, TreeEntry};
