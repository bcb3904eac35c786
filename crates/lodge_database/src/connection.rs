//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use lodge_error::{DatabaseError, DatabaseErrorKind};
use tracing::{debug, instrument};

/// Pool of PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Read `DATABASE_URL` from the environment.
///
/// # Errors
///
/// Returns a connection error when the variable is unset or empty.
pub fn database_url_from_env() -> DatabaseResult<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))),
    }
}

/// Establish a single connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    let database_url = database_url_from_env()?;
    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Build a connection pool of at most `max_size` connections.
///
/// The pool connects lazily; an unreachable server surfaces on first use.
#[instrument(skip(database_url))]
pub fn create_pool(database_url: &str, max_size: u32) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .min_idle(Some(0))
        .build(manager)?;
    debug!(max_size, "Created connection pool");
    Ok(pool)
}
