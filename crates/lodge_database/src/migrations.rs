//! Embedded schema migrations.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use lodge_error::{DatabaseError, DatabaseErrorKind};
use tracing::{info, instrument};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration, returning the applied versions.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), "Applied migrations");
    Ok(applied)
}

/// Versions of migrations not yet applied.
pub fn pending_migrations(conn: &mut PgConnection) -> DatabaseResult<Vec<String>> {
    let pending = conn
        .pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    Ok(pending.iter().map(|m| m.name().to_string()).collect())
}
