//! Request handlers.
//!
//! Public reads answer with a [`QueryState`] body so renderers can treat
//! every response alike. Admin writes answer with the written block.

use crate::{ApiError, AppState, env_presence, render_sitemap};
use axum::Json;
use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use lodge_content::QueryState;
use lodge_core::{
    Block, BlockKind, Media, Page, PageWithBlocks, RenderedPage, SuiteWithMedia, Testimonial,
};
use lodge_error::HttpError;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

type ApiResult<T> = Result<Json<QueryState<T>>, ApiError>;

/// Query string for the testimonials listing.
#[derive(Debug, Default, Deserialize)]
pub struct TestimonialParams {
    /// Only featured testimonials
    #[serde(default)]
    pub featured: bool,
}

/// Body of a reorder request: move the block at index `from` to `to`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReorderRequest {
    /// Current index
    pub from: usize,
    /// Target index
    pub to: usize,
}

/// Result of a reorder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderResponse {
    /// Whether anything moved
    pub changed: bool,
    /// Blocks in their resulting order
    pub blocks: Vec<Block>,
}

/// Body of a draft save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBlockRequest {
    /// Payload schema
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Draft content
    pub payload: JsonValue,
}

pub(crate) async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

#[instrument(skip(state))]
pub(crate) async fn sitemap(State(state): State<AppState>) -> Result<Response, ApiError> {
    let pages = state.content.pages().await?;
    let xml = render_sitemap(&state.site_url, &pages);
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

pub(crate) async fn debug_env() -> Json<BTreeMap<&'static str, bool>> {
    Json(env_presence())
}

pub(crate) async fn list_pages(State(state): State<AppState>) -> ApiResult<Vec<Page>> {
    Ok(Json(QueryState::success(state.content.pages().await?)))
}

pub(crate) async fn page_content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<PageWithBlocks> {
    Ok(Json(QueryState::success(
        state.content.page_content(&slug).await?,
    )))
}

pub(crate) async fn published_blocks(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Vec<Block>> {
    Ok(Json(QueryState::success(
        state.content.published_blocks(&slug).await?,
    )))
}

pub(crate) async fn rendered_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<RenderedPage> {
    Ok(Json(QueryState::success(
        state.content.rendered_page(&slug).await?,
    )))
}

pub(crate) async fn suites(State(state): State<AppState>) -> ApiResult<Vec<SuiteWithMedia>> {
    Ok(Json(QueryState::success(state.content.suites().await?)))
}

pub(crate) async fn testimonials(
    State(state): State<AppState>,
    Query(params): Query<TestimonialParams>,
) -> ApiResult<Vec<Testimonial>> {
    Ok(Json(QueryState::success(
        state.content.testimonials(params.featured).await?,
    )))
}

pub(crate) async fn media(State(state): State<AppState>) -> ApiResult<Vec<Media>> {
    Ok(Json(QueryState::success(state.content.media().await?)))
}

/// Fresh read of a page with drafts, for the editor.
#[instrument(skip(state))]
pub(crate) async fn admin_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<PageWithBlocks> {
    let page = state.content.admin_page(&slug).await?;
    if page.page.is_placeholder() {
        return Err(ApiError(HttpError::new(404, format!("No page '{}'", slug)).into()));
    }
    Ok(Json(QueryState::success(page)))
}

#[instrument(skip(state))]
pub(crate) async fn reorder_blocks(
    State(state): State<AppState>,
    Path(page_id): Path<Uuid>,
    Json(request): Json<ReorderRequest>,
) -> ApiResult<ReorderResponse> {
    let response = match state.editor.reorder(page_id, request.from, request.to).await? {
        Some(blocks) => ReorderResponse {
            changed: true,
            blocks,
        },
        None => {
            let blocks = state
                .content
                .store()
                .page_with_blocks(page_id)
                .await?
                .map(|page| page.blocks)
                .unwrap_or_default();
            ReorderResponse {
                changed: false,
                blocks,
            }
        }
    };
    Ok(Json(QueryState::success(response)))
}

#[instrument(skip(state, request))]
pub(crate) async fn save_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
    Json(request): Json<SaveBlockRequest>,
) -> ApiResult<Block> {
    let block = state
        .editor
        .save_draft(block_id, request.kind, request.payload)
        .await?;
    Ok(Json(QueryState::success(block)))
}

pub(crate) async fn publish_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> ApiResult<Block> {
    Ok(Json(QueryState::success(
        state.editor.publish(block_id).await?,
    )))
}

pub(crate) async fn unpublish_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> ApiResult<Block> {
    Ok(Json(QueryState::success(
        state.editor.unpublish(block_id).await?,
    )))
}

/// Log method, path, status and latency of every request.
pub(crate) async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if path == "/health" {
        debug!(%method, %path, status, elapsed_ms, "Request handled");
    } else {
        info!(%method, %path, status, elapsed_ms, "Request handled");
    }
    response
}
