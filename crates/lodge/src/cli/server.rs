//! The `serve` command.

use anyhow::Result;
use lodge::{AppState, ContentService, LodgeConfig, create_router, serve, service_key_from_env};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[cfg(feature = "database")]
fn content_store(config: &LodgeConfig) -> Result<Arc<dyn lodge::ContentStore>> {
    use lodge::{PostgresContentStore, create_pool, database_url_from_env};

    let pool = create_pool(&database_url_from_env()?, config.database.pool_size)?;
    Ok(Arc::new(PostgresContentStore::new(pool)))
}

#[cfg(not(feature = "database"))]
fn content_store(_config: &LodgeConfig) -> Result<Arc<dyn lodge::ContentStore>> {
    warn!("Database feature not enabled; serving an empty in-memory store");
    Ok(Arc::new(lodge::InMemoryContentStore::new()))
}

/// Serve the HTTP API until Ctrl-C.
pub async fn run_server(config: LodgeConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());

    let service_key = service_key_from_env();
    if service_key.is_none() {
        warn!("LODGE_SERVICE_KEY not set; admin routes will reject every request");
    }

    let content = Arc::new(ContentService::new(content_store(&config)?, config.cache.clone()));

    let sweeper = {
        let content = Arc::clone(&content);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CACHE_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = content.cleanup_cache();
                if removed > 0 {
                    debug!(removed, "Expired cache entries removed");
                }
            }
        })
    };

    info!(bind = %bind, site_url = %config.server.site_url, "Starting Lodge server");
    let state = AppState::new(content, service_key, config.server.site_url.clone());
    let result = serve(&bind, create_router(state)).await;

    sweeper.abort();
    Ok(result?)
}
