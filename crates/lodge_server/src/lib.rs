//! HTTP surface for Lodge.
//!
//! Public routes serve cached content as [`lodge_content::QueryState`]
//! bodies. Admin routes sit behind a bearer service key and write through
//! [`lodge_content::BlockEditor`].
//!
//! # Example
//!
//! ```no_run
//! use lodge_cache::QueryCacheConfig;
//! use lodge_content::{ContentService, InMemoryContentStore};
//! use lodge_server::{AppState, create_router, serve, service_key_from_env};
//! use std::sync::Arc;
//!
//! # async fn run() -> lodge_error::LodgeResult<()> {
//! let content = Arc::new(ContentService::new(
//!     Arc::new(InMemoryContentStore::new()),
//!     QueryCacheConfig::default(),
//! ));
//! let state = AppState::new(content, service_key_from_env(), "http://localhost:3000");
//! serve("127.0.0.1:3000", create_router(state)).await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod env;
mod error;
mod routes;
mod server;
mod sitemap;

pub use auth::{SERVICE_KEY_VAR, require_service_key, service_key_from_env};
pub use config::{DatabaseSettings, LodgeConfig, ServerSettings};
pub use env::{EXPECTED_ENV_VARS, env_presence};
pub use error::ApiError;
pub use routes::{ReorderRequest, ReorderResponse, SaveBlockRequest, TestimonialParams};
pub use server::{AppState, create_router, serve};
pub use sitemap::render_sitemap;
