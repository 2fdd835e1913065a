use ormigrate_common::{Error, Result};
use ormigrate_db::Migrations;
use ormigrate_db::migrations::migration_fn;

/// Discovers the SQL files next to this file and registers the seed
/// migration this file is named after.
pub fn load(migrations: &mut Migrations) -> Result<()> {
    migrations.discover_caller()?;
    migrations.must_register(
        Some(migration_fn(|conn| {
            conn.execute("INSERT INTO users (name, email) VALUES ('admin', 'admin@localhost')", [])
                .map(|_| ())
                .map_err(|e| Error::Database(e.to_string()))
        })),
        Some(migration_fn(|conn| {
            conn.execute("DELETE FROM users WHERE name = 'admin'", [])
                .map(|_| ())
                .map_err(|e| Error::Database(e.to_string()))
        })),
    );
    Ok(())
}

pub fn registry() -> Migrations {
    Migrations::new()
}
