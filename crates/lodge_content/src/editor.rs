//! Admin block editing.

use crate::{BlockPersistence, BlockReorderSession, ContentService, DropOutcome};
use async_trait::async_trait;
use lodge_core::{
    Block, BlockContent, BlockKind, PageWithBlocks, has_contiguous_positions, renumber_positions,
};
use lodge_error::{EditorError, EditorErrorKind, LodgeResult};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

fn unknown_block(block_id: Uuid) -> EditorError {
    EditorError::new(EditorErrorKind::UnknownBlock(block_id.to_string()))
}

/// Writes block changes to the store and invalidates the cached page.
///
/// Payloads are validated against their block type before anything is
/// written; a failing payload is reported field by field and not persisted.
#[derive(Debug, Clone)]
pub struct BlockEditor {
    service: Arc<ContentService>,
}

impl BlockEditor {
    /// Create an editor writing through the service's store.
    pub fn new(service: Arc<ContentService>) -> Self {
        Self { service }
    }

    /// The service whose cache this editor invalidates.
    pub fn service(&self) -> &Arc<ContentService> {
        &self.service
    }

    async fn existing_block(&self, block_id: Uuid) -> LodgeResult<Block> {
        self.service
            .store()
            .block(block_id)
            .await?
            .ok_or_else(|| unknown_block(block_id).into())
    }

    async fn existing_page(&self, page_id: Uuid) -> LodgeResult<PageWithBlocks> {
        self.service
            .store()
            .page_with_blocks(page_id)
            .await?
            .ok_or_else(|| {
                EditorError::new(EditorErrorKind::UnknownPage(page_id.to_string())).into()
            })
    }

    /// Validate and save a block's draft payload.
    #[instrument(skip(self, payload))]
    pub async fn save_draft(
        &self,
        block_id: Uuid,
        kind: BlockKind,
        payload: JsonValue,
    ) -> LodgeResult<Block> {
        BlockContent::parse(kind, &payload)?;

        let block = self
            .service
            .store()
            .save_draft(block_id, kind, &payload)
            .await?
            .ok_or_else(|| unknown_block(block_id))?;

        self.service.invalidate_page_id(block.page_id).await;
        debug!("Draft saved");
        Ok(block)
    }

    /// Copy a block's validated draft into its published snapshot.
    #[instrument(skip(self))]
    pub async fn publish(&self, block_id: Uuid) -> LodgeResult<Block> {
        let block = self.existing_block(block_id).await?;
        if block.payload.is_null() {
            return Err(
                EditorError::new(EditorErrorKind::NothingToPublish(block_id.to_string())).into(),
            );
        }
        block.draft_content()?;

        let published = self
            .service
            .store()
            .set_published(block_id, Some(&block.payload))
            .await?
            .ok_or_else(|| unknown_block(block_id))?;

        self.service.invalidate_page_id(published.page_id).await;
        info!(page_id = %published.page_id, "Block published");
        Ok(published)
    }

    /// Clear a block's published snapshot.
    #[instrument(skip(self))]
    pub async fn unpublish(&self, block_id: Uuid) -> LodgeResult<Block> {
        let block = self
            .service
            .store()
            .set_published(block_id, None)
            .await?
            .ok_or_else(|| unknown_block(block_id))?;

        self.service.invalidate_page_id(block.page_id).await;
        info!(page_id = %block.page_id, "Block unpublished");
        Ok(block)
    }

    /// Validate a payload and append it to a page as an unpublished block.
    #[instrument(skip(self, payload))]
    pub async fn add_block(
        &self,
        page_id: Uuid,
        kind: BlockKind,
        payload: JsonValue,
    ) -> LodgeResult<Block> {
        BlockContent::parse(kind, &payload)?;
        self.existing_page(page_id).await?;

        let draft = Block::draft(page_id, kind, 0, payload);
        let block = self.service.store().insert_block(&draft).await?;
        self.service.invalidate_page_id(page_id).await;
        debug!(position = block.position, "Block added");
        Ok(block)
    }

    /// Delete a block and close the gap it leaves.
    ///
    /// Deleting an unknown block does nothing.
    #[instrument(skip(self))]
    pub async fn delete_block(&self, block_id: Uuid) -> LodgeResult<()> {
        let Some(block) = self.service.store().block(block_id).await? else {
            debug!("Block already gone");
            return Ok(());
        };

        self.service.store().delete_block(block_id).await?;

        if let Some(page) = self.service.store().page_with_blocks(block.page_id).await? {
            let mut remaining = page.blocks;
            if !has_contiguous_positions(&remaining) {
                renumber_positions(&mut remaining);
                self.service
                    .store()
                    .write_block_positions(block.page_id, &remaining)
                    .await?;
            }
        }

        self.service.invalidate_page_id(block.page_id).await;
        info!(page_id = %block.page_id, "Block deleted");
        Ok(())
    }

    /// Start a reorder session over a page's current blocks.
    pub async fn reorder_session(
        &self,
        page_id: Uuid,
    ) -> LodgeResult<BlockReorderSession<StorePersistence>> {
        let page = self.existing_page(page_id).await?;
        Ok(BlockReorderSession::new(
            page_id,
            page.blocks,
            StorePersistence::new(Arc::clone(&self.service)),
        ))
    }

    /// Move the block at index `from` to index `to` and persist the page.
    ///
    /// Returns `None` when `from == to`; nothing is written then.
    #[instrument(skip(self))]
    pub async fn reorder(
        &self,
        page_id: Uuid,
        from: usize,
        to: usize,
    ) -> LodgeResult<Option<Vec<Block>>> {
        let mut session = self.reorder_session(page_id).await?;
        session.begin_drag_at(from)?;
        match session.drop_at(to).await? {
            DropOutcome::Unchanged => Ok(None),
            DropOutcome::Reordered(blocks) => Ok(Some(blocks)),
        }
    }
}

/// Persists reorders to the service's store and drops the cached page.
#[derive(Debug, Clone)]
pub struct StorePersistence {
    service: Arc<ContentService>,
}

impl StorePersistence {
    /// Persist through this service.
    pub fn new(service: Arc<ContentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BlockPersistence for StorePersistence {
    async fn persist(&self, page_id: Uuid, blocks: &[Block]) -> LodgeResult<()> {
        self.service
            .store()
            .write_block_positions(page_id, blocks)
            .await?;
        self.service.invalidate_page_id(page_id).await;
        Ok(())
    }
}
