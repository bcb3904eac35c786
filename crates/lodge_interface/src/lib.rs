//! Store contract for the Lodge content service.
//!
//! The content layer talks to its system of record only through
//! [`ContentStore`]. The Postgres implementation lives in `lodge_database`;
//! an in-memory implementation for tests and demos lives in `lodge_content`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;

pub use lodge_core::PageWithBlocks;
pub use store::ContentStore;
