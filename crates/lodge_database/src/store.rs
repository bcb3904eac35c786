//! ContentStore trait implementation.
//!
//! Runs the synchronous [`crate::queries`] on tokio's blocking pool with a
//! pooled connection.

use crate::{DatabaseResult, PgPool, queries};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use lodge_core::{Block, BlockKind, Media, Page, PageWithBlocks, Suite, Testimonial};
use lodge_error::{DatabaseError, DatabaseErrorKind, LodgeResult};
use lodge_interface::ContentStore;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Database-backed content store.
#[derive(Clone)]
pub struct PostgresContentStore {
    pool: PgPool,
}

impl PostgresContentStore {
    /// Create a new content store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn with_conn<T, F>(&self, f: F) -> LodgeResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;
        Ok(result?)
    }
}

impl std::fmt::Debug for PostgresContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("PostgresContentStore")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

#[async_trait]
impl ContentStore for PostgresContentStore {
    async fn list_pages(&self) -> LodgeResult<Vec<Page>> {
        self.with_conn(queries::list_pages).await
    }

    async fn page_by_slug(&self, slug: &str) -> LodgeResult<Option<Page>> {
        let slug = slug.to_string();
        self.with_conn(move |conn| queries::page_by_slug(conn, &slug))
            .await
    }

    async fn page_with_blocks(&self, page_id: Uuid) -> LodgeResult<Option<PageWithBlocks>> {
        self.with_conn(move |conn| queries::page_with_blocks(conn, page_id))
            .await
    }

    async fn block(&self, block_id: Uuid) -> LodgeResult<Option<Block>> {
        self.with_conn(move |conn| queries::block_by_id(conn, block_id))
            .await
    }

    async fn insert_block(&self, block: &Block) -> LodgeResult<Block> {
        let block = block.clone();
        self.with_conn(move |conn| queries::insert_block(conn, &block))
            .await
    }

    async fn save_draft(
        &self,
        block_id: Uuid,
        kind: BlockKind,
        payload: &JsonValue,
    ) -> LodgeResult<Option<Block>> {
        let payload = payload.clone();
        self.with_conn(move |conn| queries::save_draft(conn, block_id, kind, &payload))
            .await
    }

    async fn set_published(
        &self,
        block_id: Uuid,
        snapshot: Option<&JsonValue>,
    ) -> LodgeResult<Option<Block>> {
        let snapshot = snapshot.cloned();
        self.with_conn(move |conn| queries::set_published(conn, block_id, snapshot.as_ref()))
            .await
    }

    async fn delete_block(&self, block_id: Uuid) -> LodgeResult<()> {
        self.with_conn(move |conn| queries::delete_block(conn, block_id))
            .await
    }

    async fn write_block_positions(&self, page_id: Uuid, blocks: &[Block]) -> LodgeResult<()> {
        let blocks = blocks.to_vec();
        self.with_conn(move |conn| queries::write_block_positions(conn, page_id, &blocks))
            .await
    }

    async fn list_media(&self) -> LodgeResult<Vec<Media>> {
        self.with_conn(queries::list_media).await
    }

    async fn media_by_ids(&self, ids: &[Uuid]) -> LodgeResult<Vec<Media>> {
        let ids = ids.to_vec();
        self.with_conn(move |conn| queries::media_by_ids(conn, &ids))
            .await
    }

    async fn list_suites(&self) -> LodgeResult<Vec<Suite>> {
        self.with_conn(queries::list_suites).await
    }

    async fn list_testimonials(&self, featured_only: bool) -> LodgeResult<Vec<Testimonial>> {
        self.with_conn(move |conn| queries::list_testimonials(conn, featured_only))
            .await
    }
}
