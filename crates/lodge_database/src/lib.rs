//! PostgreSQL content store for Lodge.
//!
//! Diesel models, the embedded schema migrations and [`PostgresContentStore`],
//! the pooled implementation of [`lodge_interface::ContentStore`].
//!
//! The query functions in [`queries`] are synchronous and take a borrowed
//! connection; the store runs them on tokio's blocking pool.
//!
//! # Example
//!
//! ```rust,ignore
//! use lodge_database::{create_pool, database_url_from_env, PostgresContentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(&database_url_from_env()?, 8)?;
//! let store = PostgresContentStore::new(pool);
//! # Ok(())
//! # }
//! ```

mod connection;
mod conversions;
mod migrations;
mod models;
mod seed;
mod store;

pub mod queries;
pub mod schema;

pub use connection::{PgPool, create_pool, database_url_from_env, establish_connection};
pub use migrations::{MIGRATIONS, pending_migrations, run_migrations};
pub use seed::{SeedReport, seed_defaults};
pub use store::PostgresContentStore;

use lodge_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
