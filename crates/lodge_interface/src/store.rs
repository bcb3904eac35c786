//! The content store trait.

use async_trait::async_trait;
use lodge_core::{Block, BlockKind, Media, Page, PageWithBlocks, Suite, Testimonial};
use lodge_error::LodgeResult;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// System of record for pages, blocks, media and inventory.
///
/// Lookups that find nothing return `Ok(None)` (or an empty list); `Err` is
/// reserved for transport and query failures. Implementations never retry.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All pages ordered by ascending priority, then slug.
    async fn list_pages(&self) -> LodgeResult<Vec<Page>>;

    /// The page with this slug, if any.
    async fn page_by_slug(&self, slug: &str) -> LodgeResult<Option<Page>>;

    /// A page joined with all of its blocks, sorted by position.
    ///
    /// Blocks are returned unfiltered; callers decide whether drafts show.
    async fn page_with_blocks(&self, page_id: Uuid) -> LodgeResult<Option<PageWithBlocks>>;

    /// A single block.
    async fn block(&self, block_id: Uuid) -> LodgeResult<Option<Block>>;

    /// Append a new block to its page.
    async fn insert_block(&self, block: &Block) -> LodgeResult<Block>;

    /// Replace a block's type and draft payload.
    async fn save_draft(
        &self,
        block_id: Uuid,
        kind: BlockKind,
        payload: &JsonValue,
    ) -> LodgeResult<Option<Block>>;

    /// Set or clear a block's published snapshot.
    async fn set_published(
        &self,
        block_id: Uuid,
        snapshot: Option<&JsonValue>,
    ) -> LodgeResult<Option<Block>>;

    /// Delete a block. Deleting a missing block is not an error.
    async fn delete_block(&self, block_id: Uuid) -> LodgeResult<()>;

    /// Write the positions of a page's block collection.
    ///
    /// `blocks` carries the complete, already renumbered collection. The
    /// last writer wins when two editors reorder the same page.
    async fn write_block_positions(&self, page_id: Uuid, blocks: &[Block]) -> LodgeResult<()>;

    /// Every media row, newest first.
    async fn list_media(&self) -> LodgeResult<Vec<Media>>;

    /// Media rows with the given ids, in no particular order.
    async fn media_by_ids(&self, ids: &[Uuid]) -> LodgeResult<Vec<Media>>;

    /// All suites ordered by ascending price.
    async fn list_suites(&self) -> LodgeResult<Vec<Suite>>;

    /// Testimonials, optionally only the featured ones.
    async fn list_testimonials(&self, featured_only: bool) -> LodgeResult<Vec<Testimonial>>;
}
