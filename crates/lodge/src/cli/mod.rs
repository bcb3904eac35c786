//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the lodge binary.

mod commands;
mod content;
mod env;
mod logging;
mod server;

pub use commands::{Cli, Commands};
pub use content::{blocks, migrate, pages, seed};
pub use env::check_env;
pub use logging::init_tracing;
pub use server::run_server;
