//! Tests for the drag-and-drop reorder lifecycle.

use async_trait::async_trait;
use lodge_content::{BlockPersistence, BlockReorderSession, DragState, DropOutcome};
use lodge_core::{Block, BlockKind, has_contiguous_positions};
use lodge_error::{EditorErrorKind, LodgeResult, StoreError};
use parking_lot::Mutex;
use serde_json::json;
use uuid::Uuid;

#[derive(Default)]
struct Recorder {
    writes: Mutex<Vec<Vec<Uuid>>>,
    fail: bool,
}

#[async_trait]
impl BlockPersistence for Recorder {
    async fn persist(&self, _page_id: Uuid, blocks: &[Block]) -> LodgeResult<()> {
        if self.fail {
            return Err(StoreError::new("write rejected").into());
        }
        self.writes
            .lock()
            .push(blocks.iter().map(|b| b.id).collect());
        Ok(())
    }
}

fn page_blocks(page_id: Uuid, count: i32) -> Vec<Block> {
    (1..=count)
        .map(|n| Block::draft(page_id, BlockKind::RichText, n, json!({"body": n})))
        .collect()
}

fn ids(blocks: &[Block]) -> Vec<Uuid> {
    blocks.iter().map(|b| b.id).collect()
}

#[tokio::test]
async fn test_drop_on_other_block_reorders_and_persists() {
    let page_id = Uuid::new_v4();
    let blocks = page_blocks(page_id, 3);
    let (b1, b2, b3) = (blocks[0].id, blocks[1].id, blocks[2].id);
    let mut session = BlockReorderSession::new(page_id, blocks, Recorder::default());

    session.begin_drag(b1).unwrap();
    assert_eq!(session.state(), DragState::Dragging { block_id: b1, from: 0 });

    let outcome = session.drop_on(b3).await.unwrap();

    let DropOutcome::Reordered(reordered) = outcome else {
        panic!("expected a reorder");
    };
    assert_eq!(ids(&reordered), vec![b2, b3, b1]);
    assert_eq!(
        reordered.iter().map(|b| b.position).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(session.state(), DragState::Idle);
    assert_eq!(ids(session.blocks()), vec![b2, b3, b1]);
    assert_eq!(session.persistence().writes.lock().clone(), vec![vec![b2, b3, b1]]);
}

#[tokio::test]
async fn test_drop_on_self_is_a_no_op() {
    let page_id = Uuid::new_v4();
    let blocks = page_blocks(page_id, 3);
    let before = blocks.clone();
    let mut session = BlockReorderSession::new(page_id, blocks, Recorder::default());

    session.begin_drag(before[1].id).unwrap();
    let outcome = session.drop_on(before[1].id).await.unwrap();

    assert_eq!(outcome, DropOutcome::Unchanged);
    assert_eq!(session.blocks(), &before[..]);
    assert!(session.persistence().writes.lock().is_empty());
    assert_eq!(session.state(), DragState::Idle);
}

#[tokio::test]
async fn test_every_move_leaves_contiguous_positions() {
    let page_id = Uuid::new_v4();
    let len = 5;

    for from in 0..len {
        for to in 0..len {
            let blocks = page_blocks(page_id, len as i32);
            let mut session = BlockReorderSession::new(page_id, blocks, Recorder::default());
            session.begin_drag_at(from).unwrap();
            session.drop_at(to).await.unwrap();
            assert!(has_contiguous_positions(session.blocks()), "{from} -> {to}");
        }
    }
}

#[tokio::test]
async fn test_failed_persist_keeps_previous_order() {
    let page_id = Uuid::new_v4();
    let blocks = page_blocks(page_id, 3);
    let before = ids(&blocks);
    let recorder = Recorder {
        fail: true,
        ..Default::default()
    };
    let mut session = BlockReorderSession::new(page_id, blocks, recorder);

    session.begin_drag_at(2).unwrap();
    assert!(session.drop_at(0).await.is_err());

    assert_eq!(ids(session.blocks()), before);
    assert_eq!(session.state(), DragState::Idle);
}

#[tokio::test]
async fn test_drag_lifecycle_misuse() {
    let page_id = Uuid::new_v4();
    let blocks = page_blocks(page_id, 2);
    let first = blocks[0].id;
    let mut session = BlockReorderSession::new(page_id, blocks, Recorder::default());

    let err = session.drop_on(first).await.unwrap_err();
    assert_eq!(err.as_editor().unwrap().kind, EditorErrorKind::NotDragging);
    assert_eq!(session.cancel().unwrap_err().kind, EditorErrorKind::NotDragging);

    session.begin_drag(first).unwrap();
    assert_eq!(
        session.begin_drag(first).unwrap_err().kind,
        EditorErrorKind::AlreadyDragging
    );

    session.cancel().unwrap();
    assert_eq!(session.state(), DragState::Idle);

    let stranger = Uuid::new_v4();
    assert!(matches!(
        session.begin_drag(stranger).unwrap_err().kind,
        EditorErrorKind::UnknownBlock(_)
    ));
}

#[tokio::test]
async fn test_session_sorts_blocks_by_position() {
    let page_id = Uuid::new_v4();
    let mut blocks = page_blocks(page_id, 3);
    blocks.reverse();

    let session = BlockReorderSession::new(page_id, blocks, Recorder::default());

    assert!(has_contiguous_positions(session.blocks()));
}
