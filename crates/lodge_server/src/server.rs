//! Router assembly and the listener loop.

use crate::auth::require_service_key;
use crate::routes;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use lodge_content::{BlockEditor, ContentService};
use lodge_error::{LodgeResult, ServerError, ServerErrorKind};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cached content reads
    pub content: Arc<ContentService>,
    /// Admin writes through the same cache
    pub editor: BlockEditor,
    /// Bearer token admin routes require; `None` rejects every admin call
    pub service_key: Option<Arc<str>>,
    /// Public origin for sitemap locations
    pub site_url: String,
}

impl AppState {
    /// Build state around a content service.
    pub fn new(
        content: Arc<ContentService>,
        service_key: Option<Arc<str>>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            editor: BlockEditor::new(Arc::clone(&content)),
            content,
            service_key,
            site_url: site_url.into(),
        }
    }
}

/// Creates the Lodge router.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/api/admin/pages/:page", get(routes::admin_page))
        .route("/api/admin/pages/:page/order", put(routes::reorder_blocks))
        .route("/api/admin/blocks/:block_id", put(routes::save_block))
        .route(
            "/api/admin/blocks/:block_id/publish",
            post(routes::publish_block),
        )
        .route(
            "/api/admin/blocks/:block_id/unpublish",
            post(routes::unpublish_block),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_service_key,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .route("/sitemap.xml", get(routes::sitemap))
        .route("/debug/env", get(routes::debug_env))
        .route("/api/pages", get(routes::list_pages))
        .route("/api/pages/:slug", get(routes::page_content))
        .route("/api/pages/:slug/blocks", get(routes::published_blocks))
        .route("/api/pages/:slug/rendered", get(routes::rendered_page))
        .route("/api/suites", get(routes::suites))
        .route("/api/testimonials", get(routes::testimonials))
        .route("/api/media", get(routes::media))
        .merge(admin)
        .layer(middleware::from_fn(routes::log_requests))
        .with_state(state)
}

/// Bind `addr` and serve `router` until Ctrl-C.
#[instrument(skip(router))]
pub async fn serve(addr: &str, router: Router) -> LodgeResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
    })?;
    info!(addr, "Lodge listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Lodge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
