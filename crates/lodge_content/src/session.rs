//! Drag-and-drop reorder sessions.
//!
//! A session owns the block list an editor sees for one page. A drag starts
//! on one block and ends on another; the drop moves the dragged block to the
//! target's index, renumbers the page and hands the full list to a
//! [`BlockPersistence`]. The session never talks to the store itself.

use async_trait::async_trait;
use lodge_core::{Block, reorder_blocks};
use lodge_error::{EditorError, EditorErrorKind, LodgeResult};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Receives a page's recomputed block order.
#[async_trait]
pub trait BlockPersistence: Send + Sync {
    /// Persist the complete, renumbered block list of a page.
    async fn persist(&self, page_id: Uuid, blocks: &[Block]) -> LodgeResult<()>;
}

#[async_trait]
impl<P: BlockPersistence + ?Sized> BlockPersistence for Arc<P> {
    async fn persist(&self, page_id: Uuid, blocks: &[Block]) -> LodgeResult<()> {
        (**self).persist(page_id, blocks).await
    }
}

/// Drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress
    Idle,
    /// A block is being dragged
    Dragging {
        /// The dragged block
        block_id: Uuid,
        /// Its index when the drag started
        from: usize,
    },
    /// A drop is being persisted
    Reordering,
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Dropped onto itself; nothing changed and nothing was persisted
    Unchanged,
    /// The page was reordered and persisted
    Reordered(Vec<Block>),
}

/// Reorder state for one page in the admin editor.
///
/// ```text
/// Idle -> Dragging -> (drop on self) Idle
///                  -> (drop on other) Reordering -> Idle
/// ```
pub struct BlockReorderSession<P> {
    page_id: Uuid,
    blocks: Vec<Block>,
    state: DragState,
    persistence: P,
}

impl<P> std::fmt::Debug for BlockReorderSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockReorderSession")
            .field("page_id", &self.page_id)
            .field("blocks", &self.blocks.len())
            .field("state", &self.state)
            .finish()
    }
}

impl<P: BlockPersistence> BlockReorderSession<P> {
    /// Start a session over a page's blocks.
    ///
    /// Blocks are put in position order.
    pub fn new(page_id: Uuid, mut blocks: Vec<Block>, persistence: P) -> Self {
        blocks.sort_by_key(|b| b.position);
        Self {
            page_id,
            blocks,
            state: DragState::Idle,
            persistence,
        }
    }

    /// The page being edited.
    pub fn page_id(&self) -> Uuid {
        self.page_id
    }

    /// Blocks in display order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// The persistence sink.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn index_of(&self, block_id: Uuid) -> Result<usize, EditorError> {
        self.blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| EditorError::new(EditorErrorKind::UnknownBlock(block_id.to_string())))
    }

    /// Pick up a block.
    pub fn begin_drag(&mut self, block_id: Uuid) -> Result<(), EditorError> {
        if self.state != DragState::Idle {
            return Err(EditorError::new(EditorErrorKind::AlreadyDragging));
        }
        let from = self.index_of(block_id)?;
        debug!(%block_id, from, "Drag started");
        self.state = DragState::Dragging { block_id, from };
        Ok(())
    }

    /// Pick up the block at an index.
    pub fn begin_drag_at(&mut self, index: usize) -> Result<(), EditorError> {
        let block_id = self
            .blocks
            .get(index)
            .map(|b| b.id)
            .ok_or_else(|| {
                EditorError::new(EditorErrorKind::IndexOutOfRange {
                    index,
                    len: self.blocks.len(),
                })
            })?;
        self.begin_drag(block_id)
    }

    /// Abandon the drag without changes.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        match self.state {
            DragState::Dragging { .. } => {
                self.state = DragState::Idle;
                Ok(())
            }
            _ => Err(EditorError::new(EditorErrorKind::NotDragging)),
        }
    }

    /// Drop the dragged block onto `target_id`.
    ///
    /// Dropping onto itself returns [`DropOutcome::Unchanged`] without
    /// touching the persistence sink. If persisting fails the session keeps
    /// its previous order and returns to idle.
    #[instrument(skip(self), fields(page_id = %self.page_id))]
    pub async fn drop_on(&mut self, target_id: Uuid) -> LodgeResult<DropOutcome> {
        let DragState::Dragging { from, .. } = self.state else {
            return Err(EditorError::new(EditorErrorKind::NotDragging).into());
        };
        let to = match self.index_of(target_id) {
            Ok(to) => to,
            Err(e) => {
                self.state = DragState::Idle;
                return Err(e.into());
            }
        };

        let Some(reordered) = reorder_blocks(&self.blocks, from, to)? else {
            debug!("Dropped onto itself");
            self.state = DragState::Idle;
            return Ok(DropOutcome::Unchanged);
        };

        self.state = DragState::Reordering;
        let persisted = self.persistence.persist(self.page_id, &reordered).await;
        self.state = DragState::Idle;

        match persisted {
            Ok(()) => {
                debug!(from, to, "Reorder persisted");
                self.blocks = reordered.clone();
                Ok(DropOutcome::Reordered(reordered))
            }
            Err(e) => {
                warn!(error = %e, "Reorder not persisted");
                Err(e)
            }
        }
    }

    /// Drop the dragged block onto the block at an index.
    pub async fn drop_at(&mut self, index: usize) -> LodgeResult<DropOutcome> {
        let Some(target_id) = self.blocks.get(index).map(|b| b.id) else {
            self.state = DragState::Idle;
            return Err(EditorError::new(EditorErrorKind::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
            .into());
        };
        self.drop_on(target_id).await
    }
}
