//! Query result caching with bounded staleness.
//!
//! This crate provides the cache that sits between the content layer and
//! the store. Entries are keyed by resource and scope (usually a slug) and
//! are read with a staleness window chosen per read: public rendering
//! tolerates minutes, the admin editor only seconds.

#![warn(missing_docs)]

mod cache;
mod key;

pub use cache::{CacheEntry, CacheStats, Freshness, QueryCache, QueryCacheConfig, QueryCacheConfigBuilder};
pub use key::{QueryKey, Resource};
