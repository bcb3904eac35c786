//! Error types for the Lodge content service.
//!
//! This crate provides the foundation error types used throughout the Lodge workspace.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Absence of a page or slug is never an error in Lodge; lookups return
//! `Option` and the content layer turns `None` into empty or placeholder
//! results. Errors are reserved for store failures, invalid payloads,
//! editor misuse, configuration and the HTTP layer.
//!
//! # Examples
//!
//! ```
//! use lodge_error::{ConfigError, LodgeResult};
//!
//! fn load() -> LodgeResult<String> {
//!     Err(ConfigError::new("LODGE_SERVICE_KEY not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod editor;
mod error;
mod http;
mod json;
mod server;
mod store;
mod validation;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use editor::{EditorError, EditorErrorKind};
pub use error::{LodgeError, LodgeErrorKind, LodgeResult};
pub use http::HttpError;
pub use json::JsonError;
pub use server::{ServerError, ServerErrorKind};
pub use store::StoreError;
pub use validation::{FieldError, ValidationError};
