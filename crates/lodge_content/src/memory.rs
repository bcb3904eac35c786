//! In-memory content store.

use async_trait::async_trait;
use chrono::Utc;
use lodge_core::{Block, BlockKind, Media, Page, PageWithBlocks, Suite, Testimonial};
use lodge_error::{LodgeResult, StoreError};
use lodge_interface::ContentStore;
use parking_lot::{Mutex, RwLock};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    pages: Vec<Page>,
    blocks: Vec<Block>,
    media: Vec<Media>,
    suites: Vec<Suite>,
    testimonials: Vec<Testimonial>,
}

/// Content store held in process memory.
///
/// Behaves like the Postgres store, including cascading block deletes and
/// append-at-end inserts. Counts calls per operation and can inject latency
/// or failures, which makes it the store of choice for tests and demos.
///
/// # Examples
///
/// ```
/// use lodge_content::InMemoryContentStore;
/// use lodge_core::Page;
/// use lodge_interface::ContentStore;
///
/// let store = InMemoryContentStore::new();
/// store.add_page(Page::placeholder("about"));
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let page = runtime.block_on(store.page_by_slug("about")).unwrap();
/// assert!(page.is_some());
/// assert_eq!(store.calls("page_by_slug"), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    tables: RwLock<Tables>,
    calls: Mutex<HashMap<&'static str, usize>>,
    latency: Mutex<Option<Duration>>,
    failure: Mutex<Option<String>>,
    failing_operations: Mutex<HashMap<&'static str, String>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. A nil id is replaced with a fresh one.
    pub fn add_page(&self, mut page: Page) -> Page {
        if page.id.is_nil() {
            page.id = Uuid::new_v4();
        }
        self.tables.write().pages.push(page.clone());
        page
    }

    /// Add a block as-is, keeping its position.
    pub fn add_block(&self, block: Block) -> Block {
        self.tables.write().blocks.push(block.clone());
        block
    }

    /// Remove a page and, like the store's foreign key, its blocks.
    pub fn remove_page(&self, page_id: Uuid) {
        let mut tables = self.tables.write();
        tables.pages.retain(|p| p.id != page_id);
        tables.blocks.retain(|b| b.page_id != page_id);
    }

    /// Add a media row.
    pub fn add_media(&self, media: Media) -> Media {
        self.tables.write().media.push(media.clone());
        media
    }

    /// Add a suite.
    pub fn add_suite(&self, suite: Suite) -> Suite {
        self.tables.write().suites.push(suite.clone());
        suite
    }

    /// Add a testimonial.
    pub fn add_testimonial(&self, testimonial: Testimonial) -> Testimonial {
        self.tables.write().testimonials.push(testimonial.clone());
        testimonial
    }

    /// Blocks of a page in position order, bypassing call counting.
    pub fn blocks_of(&self, page_id: Uuid) -> Vec<Block> {
        let mut blocks: Vec<Block> = self
            .tables
            .read()
            .blocks
            .iter()
            .filter(|b| b.page_id == page_id)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.position);
        blocks
    }

    /// How many times an operation was called, by trait method name.
    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    /// Total calls across every operation.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    /// Delay every operation by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Make every operation fail with `message` until cleared.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_string);
    }

    /// Fail only `operation` with `message`; `None` clears it.
    pub fn set_operation_failure(&self, operation: &'static str, message: Option<&str>) {
        let mut failing = self.failing_operations.lock();
        match message {
            Some(message) => {
                failing.insert(operation, message.to_string());
            }
            None => {
                failing.remove(operation);
            }
        }
    }

    async fn enter(&self, operation: &'static str) -> LodgeResult<()> {
        *self.calls.lock().entry(operation).or_default() += 1;
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let failure = self
            .failure
            .lock()
            .clone()
            .or_else(|| self.failing_operations.lock().get(operation).cloned());
        match failure {
            Some(message) => Err(StoreError::new(message).into()),
            None => Ok(()),
        }
    }

    fn update_block(&self, block_id: Uuid, apply: impl FnOnce(&mut Block)) -> Option<Block> {
        let mut tables = self.tables.write();
        let block = tables.blocks.iter_mut().find(|b| b.id == block_id)?;
        apply(block);
        block.updated_at = Utc::now();
        Some(block.clone())
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list_pages(&self) -> LodgeResult<Vec<Page>> {
        self.enter("list_pages").await?;
        let mut pages = self.tables.read().pages.clone();
        pages.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.slug.cmp(&b.slug)));
        Ok(pages)
    }

    async fn page_by_slug(&self, slug: &str) -> LodgeResult<Option<Page>> {
        self.enter("page_by_slug").await?;
        Ok(self
            .tables
            .read()
            .pages
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn page_with_blocks(&self, page_id: Uuid) -> LodgeResult<Option<PageWithBlocks>> {
        self.enter("page_with_blocks").await?;
        let page = self
            .tables
            .read()
            .pages
            .iter()
            .find(|p| p.id == page_id)
            .cloned();
        Ok(page.map(|page| PageWithBlocks::new(page, self.blocks_of(page_id))))
    }

    async fn block(&self, block_id: Uuid) -> LodgeResult<Option<Block>> {
        self.enter("block").await?;
        Ok(self
            .tables
            .read()
            .blocks
            .iter()
            .find(|b| b.id == block_id)
            .cloned())
    }

    async fn insert_block(&self, block: &Block) -> LodgeResult<Block> {
        self.enter("insert_block").await?;
        let mut tables = self.tables.write();
        let last = tables
            .blocks
            .iter()
            .filter(|b| b.page_id == block.page_id)
            .map(|b| b.position)
            .max()
            .unwrap_or(0);
        let mut inserted = block.clone();
        inserted.position = last + 1;
        inserted.updated_at = Utc::now();
        tables.blocks.push(inserted.clone());
        Ok(inserted)
    }

    async fn save_draft(
        &self,
        block_id: Uuid,
        kind: BlockKind,
        payload: &JsonValue,
    ) -> LodgeResult<Option<Block>> {
        self.enter("save_draft").await?;
        Ok(self.update_block(block_id, |block| {
            block.kind = kind;
            block.payload = payload.clone();
        }))
    }

    async fn set_published(
        &self,
        block_id: Uuid,
        snapshot: Option<&JsonValue>,
    ) -> LodgeResult<Option<Block>> {
        self.enter("set_published").await?;
        Ok(self.update_block(block_id, |block| {
            block.published = snapshot.filter(|v| !v.is_null()).cloned();
        }))
    }

    async fn delete_block(&self, block_id: Uuid) -> LodgeResult<()> {
        self.enter("delete_block").await?;
        self.tables.write().blocks.retain(|b| b.id != block_id);
        Ok(())
    }

    async fn write_block_positions(&self, page_id: Uuid, blocks: &[Block]) -> LodgeResult<()> {
        self.enter("write_block_positions").await?;
        let mut tables = self.tables.write();
        let now = Utc::now();

        let mut ordered: Vec<Uuid> = blocks
            .iter()
            .filter(|b| b.page_id == page_id)
            .map(|b| b.id)
            .collect();
        let mut rest: Vec<&Block> = tables
            .blocks
            .iter()
            .filter(|b| b.page_id == page_id && !ordered.contains(&b.id))
            .collect();
        rest.sort_by_key(|b| b.position);
        ordered.extend(rest.into_iter().map(|b| b.id));

        for block in tables.blocks.iter_mut().filter(|b| b.page_id == page_id) {
            if let Some(index) = ordered.iter().position(|id| *id == block.id) {
                block.position = index as i32 + 1;
                block.updated_at = now;
            }
        }
        Ok(())
    }

    async fn list_media(&self) -> LodgeResult<Vec<Media>> {
        self.enter("list_media").await?;
        let mut media = self.tables.read().media.clone();
        media.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(media)
    }

    async fn media_by_ids(&self, ids: &[Uuid]) -> LodgeResult<Vec<Media>> {
        self.enter("media_by_ids").await?;
        Ok(self
            .tables
            .read()
            .media
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }

    async fn list_suites(&self) -> LodgeResult<Vec<Suite>> {
        self.enter("list_suites").await?;
        let mut suites = self.tables.read().suites.clone();
        suites.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
        Ok(suites)
    }

    async fn list_testimonials(&self, featured_only: bool) -> LodgeResult<Vec<Testimonial>> {
        self.enter("list_testimonials").await?;
        let mut rows: Vec<Testimonial> = self
            .tables
            .read()
            .testimonials
            .iter()
            .filter(|t| !featured_only || t.is_featured)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.is_featured
                .cmp(&a.is_featured)
                .then_with(|| b.rating.cmp(&a.rating))
        });
        Ok(rows)
    }
}
