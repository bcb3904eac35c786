//! Content queries and admin editing for Lodge.
//!
//! - [`ContentService`]: cached, coalesced reads resolving slugs to pages,
//!   published blocks, suites and testimonials
//! - [`QueryState`]: the `{ data, is_loading, error }` shape renderers consume
//! - [`BlockEditor`]: validated draft saves, publish/unpublish, add, delete
//!   and reorder, each invalidating the cached page
//! - [`BlockReorderSession`]: the drag lifecycle, persisting through a
//!   [`BlockPersistence`] sink
//! - [`InMemoryContentStore`]: a [`lodge_interface::ContentStore`] for tests
//!   and demos
//!
//! # Example
//!
//! ```
//! use lodge_cache::QueryCacheConfig;
//! use lodge_content::{ContentService, InMemoryContentStore};
//! use std::sync::Arc;
//!
//! let service = ContentService::new(Arc::new(InMemoryContentStore::new()), QueryCacheConfig::default());
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//!
//! let page = runtime.block_on(service.page_content("nowhere")).unwrap();
//! assert!(page.page.is_placeholder());
//! assert!(page.blocks.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod editor;
mod memory;
mod service;
mod session;
mod state;

pub use editor::{BlockEditor, StorePersistence};
pub use memory::InMemoryContentStore;
pub use service::ContentService;
pub use session::{BlockPersistence, BlockReorderSession, DragState, DropOutcome};
pub use state::QueryState;
