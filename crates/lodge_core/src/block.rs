//! Positioned content blocks and page aggregates.

use crate::{BlockContent, Page};
use chrono::{DateTime, Utc};
use lodge_error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Discriminant selecting a block's payload schema.
///
/// Stored as a kebab-case string in the `blocks.type` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BlockKind {
    /// Full-width image with headline
    HeroImage,
    /// Text beside an image
    SplitBlock,
    /// Free-form prose
    RichText,
    /// Image grid
    Gallery,
    /// Headline with a single button
    CallToAction,
    /// Guest quotes pulled from the testimonials table
    Testimonials,
}

/// A positioned content unit belonging to a page.
///
/// `payload` is the editor's working copy. `published` is the last
/// explicitly published snapshot and is the only content public rendering
/// uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Primary key
    pub id: Uuid,
    /// Owning page
    pub page_id: Uuid,
    /// Payload schema discriminant
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// 1-based position, unique within the page
    pub position: i32,
    /// Draft content
    pub payload: JsonValue,
    /// Last published snapshot
    pub published: Option<JsonValue>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Block {
    /// Create an unpublished block with a fresh id.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge_core::{Block, BlockKind};
    /// use serde_json::json;
    /// use uuid::Uuid;
    ///
    /// let block = Block::draft(Uuid::new_v4(), BlockKind::RichText, 1, json!({"body": "Hi"}));
    /// assert!(!block.is_published());
    /// ```
    pub fn draft(page_id: Uuid, kind: BlockKind, position: i32, payload: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_id,
            kind,
            position,
            payload,
            published: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether a published snapshot is present.
    ///
    /// A stored JSON `null` counts as unpublished.
    pub fn is_published(&self) -> bool {
        matches!(&self.published, Some(value) if !value.is_null())
    }

    /// Validate and decode the draft payload.
    pub fn draft_content(&self) -> Result<BlockContent, ValidationError> {
        BlockContent::parse(self.kind, &self.payload)
    }

    /// Validate and decode the published snapshot, if any.
    pub fn published_content(&self) -> Result<Option<BlockContent>, ValidationError> {
        match &self.published {
            Some(value) if !value.is_null() => BlockContent::parse(self.kind, value).map(Some),
            _ => Ok(None),
        }
    }
}

/// A page joined with its blocks, sorted by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageWithBlocks {
    /// The page row
    pub page: Page,
    /// Every block of the page, draft and published alike
    pub blocks: Vec<Block>,
}

impl PageWithBlocks {
    /// Join a page with its blocks, sorting blocks by position.
    pub fn new(page: Page, mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|b| b.position);
        Self { page, blocks }
    }

    /// Placeholder aggregate for a slug with no stored page.
    pub fn placeholder(slug: &str) -> Self {
        Self {
            page: Page::placeholder(slug),
            blocks: Vec::new(),
        }
    }

    /// Published blocks only, ascending by position.
    pub fn published_blocks(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self
            .blocks
            .iter()
            .filter(|b| b.is_published())
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.position);
        blocks
    }
}

/// A published block decoded into its typed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    /// Block id
    pub id: Uuid,
    /// Position on the page
    pub position: i32,
    /// Typed published content
    pub content: BlockContent,
}

/// What the public site renders for a slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// The page, possibly a placeholder
    pub page: Page,
    /// Published blocks in display order
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedPage {
    /// Decode the published blocks of a page.
    ///
    /// Snapshots that no longer satisfy their schema are skipped with a
    /// warning rather than failing the whole page.
    pub fn from_page(page: &PageWithBlocks) -> Self {
        let blocks = page
            .published_blocks()
            .into_iter()
            .filter_map(|block| match block.published_content() {
                Ok(Some(content)) => Some(RenderedBlock {
                    id: block.id,
                    position: block.position,
                    content,
                }),
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(block_id = %block.id, error = %e, "Skipping invalid published block");
                    None
                }
            })
            .collect();

        Self {
            page: page.page.clone(),
            blocks,
        }
    }
}
