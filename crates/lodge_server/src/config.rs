//! Layered service configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`lodge.toml` shipped with the crate)
//! 2. `~/.config/lodge/lodge.toml`
//! 3. `./lodge.toml`
//! 4. `LODGE__`-prefixed environment variables, e.g. `LODGE__SERVER__BIND`
//!
//! Secrets never live here: the store URL and the service key are read
//! from `DATABASE_URL` and `LODGE_SERVICE_KEY`.

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use lodge_cache::QueryCacheConfig;
use lodge_error::{ConfigError, LodgeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../lodge.toml");

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_pool_size() -> u32 {
    8
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Public origin used for sitemap locations
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            site_url: default_site_url(),
        }
    }
}

/// Store connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

/// Top-level Lodge configuration.
///
/// # Example
///
/// ```no_run
/// use lodge_server::LodgeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LodgeConfig::load()?;
/// println!("listening on {}", config.server.bind);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LodgeConfig {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerSettings,
    /// Query cache
    #[serde(default)]
    pub cache: QueryCacheConfig,
    /// Store connection
    #[serde(default)]
    pub database: DatabaseSettings,
}

impl LodgeConfig {
    /// Load configuration from every source.
    #[instrument]
    pub fn load() -> LodgeResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/lodge/lodge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("lodge").required(false))
            .add_source(
                Environment::with_prefix("LODGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load bundled defaults overridden by one file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> LodgeResult<Self> {
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Load bundled defaults overridden by TOML text.
    pub fn from_toml(toml: &str) -> LodgeResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> LodgeResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        debug!(bind = %config.server.bind, pool_size = config.database.pool_size, "Configuration loaded");
        Ok(config)
    }
}
