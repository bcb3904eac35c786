//! Lodge - block-based content for a boutique lodge website
//!
//! Pages are assembled from ordered, typed blocks. Editors work on a draft
//! payload per block and publish explicit snapshots; the public site only
//! ever renders published snapshots. Reads go through a TTL query cache
//! that coalesces concurrent requests for the same key.
//!
//! # Cargo Features
//!
//! - `database` (default) - PostgreSQL store, migrations and seed data
//!
//! # Architecture
//!
//! - `lodge_error` - Error types
//! - `lodge_core` - Pages, blocks, payload schemas and reorder helpers
//! - `lodge_interface` - The `ContentStore` trait
//! - `lodge_cache` - Query cache
//! - `lodge_database` - PostgreSQL `ContentStore`
//! - `lodge_content` - Cached queries, block editor and reorder sessions
//! - `lodge_server` - HTTP surface
//!
//! This crate (`lodge`) re-exports everything for convenience.

pub use lodge_cache::*;
pub use lodge_content::*;
pub use lodge_core::*;
pub use lodge_error::*;
pub use lodge_interface::*;
pub use lodge_server::*;

#[cfg(feature = "database")]
pub use lodge_database::*;
