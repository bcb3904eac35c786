//! Tests for the admin block editor.

use lodge_cache::QueryCacheConfig;
use lodge_content::{BlockEditor, ContentService, InMemoryContentStore};
use lodge_core::{Block, BlockKind, Page, PageBuilder, has_contiguous_positions};
use lodge_error::{EditorErrorKind, LodgeErrorKind};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    store: Arc<InMemoryContentStore>,
    editor: BlockEditor,
    page: Page,
    blocks: Vec<Block>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryContentStore::new());
    let page = store.add_page(
        PageBuilder::default()
            .slug("experiences")
            .name("Experiences")
            .priority(3)
            .build()
            .unwrap(),
    );
    let blocks = (1..=3)
        .map(|n| {
            store.add_block(Block::draft(
                page.id,
                BlockKind::RichText,
                n,
                json!({"body": format!("Block {n}")}),
            ))
        })
        .collect();
    let service = Arc::new(ContentService::new(store.clone(), QueryCacheConfig::default()));

    Fixture {
        store,
        editor: BlockEditor::new(service),
        page,
        blocks,
    }
}

fn split_without_description() -> serde_json::Value {
    json!({
        "title": "Forest suites",
        "image": "/img/forest.jpg",
        "image_position": "left"
    })
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_and_not_persisted() {
    let f = fixture();
    let block_id = f.blocks[0].id;

    let err = f
        .editor
        .save_draft(block_id, BlockKind::SplitBlock, split_without_description())
        .await
        .unwrap_err();

    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.message_for("description"), Some("is required"));
    assert_eq!(f.store.calls("save_draft"), 0);
    assert_eq!(f.store.blocks_of(f.page.id)[0].kind, BlockKind::RichText);
}

#[tokio::test]
async fn test_valid_draft_is_saved_without_publishing() {
    let f = fixture();
    let block_id = f.blocks[1].id;

    let saved = f
        .editor
        .save_draft(block_id, BlockKind::RichText, json!({"body": "Updated"}))
        .await
        .unwrap();

    assert_eq!(saved.payload["body"], "Updated");
    assert!(!saved.is_published());
}

#[tokio::test]
async fn test_saving_unknown_block_is_an_editor_error() {
    let f = fixture();

    let err = f
        .editor
        .save_draft(Uuid::new_v4(), BlockKind::RichText, json!({"body": "x"}))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_editor().map(|e| &e.kind),
        Some(EditorErrorKind::UnknownBlock(_))
    ));
}

#[tokio::test]
async fn test_publish_makes_block_public_and_invalidates_cache() {
    let f = fixture();
    let service = f.editor.service().clone();
    assert!(service.published_blocks("experiences").await.unwrap().is_empty());

    f.editor.publish(f.blocks[0].id).await.unwrap();

    let published = service.published_blocks("experiences").await.unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].published, Some(f.blocks[0].payload.clone()));
}

#[tokio::test]
async fn test_publish_refuses_an_invalid_draft() {
    let f = fixture();
    let block = f.store.add_block(Block::draft(
        f.page.id,
        BlockKind::Gallery,
        4,
        json!({"images": []}),
    ));

    let err = f.editor.publish(block.id).await.unwrap_err();

    assert!(matches!(err.kind(), LodgeErrorKind::Validation(_)));
    assert_eq!(f.store.calls("set_published"), 0);
}

#[tokio::test]
async fn test_unpublish_hides_block() {
    let f = fixture();
    let service = f.editor.service().clone();
    f.editor.publish(f.blocks[2].id).await.unwrap();
    assert_eq!(service.published_blocks("experiences").await.unwrap().len(), 1);

    let block = f.editor.unpublish(f.blocks[2].id).await.unwrap();

    assert!(!block.is_published());
    assert!(service.published_blocks("experiences").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_block_appends_at_end() {
    let f = fixture();

    let block = f
        .editor
        .add_block(
            f.page.id,
            BlockKind::CallToAction,
            json!({"title": "Book a stay", "button_label": "Book", "button_href": "/contact"}),
        )
        .await
        .unwrap();

    assert_eq!(block.position, 4);
    assert!(!block.is_published());
}

#[tokio::test]
async fn test_add_block_to_unknown_page_fails() {
    let f = fixture();

    let err = f
        .editor
        .add_block(Uuid::new_v4(), BlockKind::RichText, json!({"body": "x"}))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_editor().map(|e| &e.kind),
        Some(EditorErrorKind::UnknownPage(_))
    ));
    assert_eq!(f.store.calls("insert_block"), 0);
}

#[tokio::test]
async fn test_delete_block_renumbers_remaining() {
    let f = fixture();

    f.editor.delete_block(f.blocks[0].id).await.unwrap();

    let remaining = f.store.blocks_of(f.page.id);
    assert_eq!(remaining.len(), 2);
    assert!(has_contiguous_positions(&remaining));
    assert_eq!(remaining[0].id, f.blocks[1].id);
}

#[tokio::test]
async fn test_deleting_last_block_needs_no_renumbering() {
    let f = fixture();

    f.editor.delete_block(f.blocks[2].id).await.unwrap();
    f.editor.delete_block(f.blocks[2].id).await.unwrap();

    assert_eq!(f.store.blocks_of(f.page.id).len(), 2);
    assert_eq!(f.store.calls("write_block_positions"), 0);
    assert_eq!(f.store.calls("delete_block"), 1);
}

#[tokio::test]
async fn test_reorder_moves_first_block_to_end() {
    let f = fixture();

    let reordered = f.editor.reorder(f.page.id, 0, 2).await.unwrap().unwrap();

    let ids: Vec<Uuid> = reordered.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![f.blocks[1].id, f.blocks[2].id, f.blocks[0].id]);
    let stored: Vec<(Uuid, i32)> = f
        .store
        .blocks_of(f.page.id)
        .iter()
        .map(|b| (b.id, b.position))
        .collect();
    assert_eq!(
        stored,
        vec![(f.blocks[1].id, 1), (f.blocks[2].id, 2), (f.blocks[0].id, 3)]
    );
}

#[tokio::test]
async fn test_reorder_onto_self_writes_nothing() {
    let f = fixture();

    assert_eq!(f.editor.reorder(f.page.id, 1, 1).await.unwrap(), None);
    assert_eq!(f.store.calls("write_block_positions"), 0);
}

#[tokio::test]
async fn test_reorder_out_of_range_is_rejected() {
    let f = fixture();

    let err = f.editor.reorder(f.page.id, 0, 7).await.unwrap_err();

    assert!(matches!(
        err.as_editor().map(|e| &e.kind),
        Some(EditorErrorKind::IndexOutOfRange { index: 7, len: 3 })
    ));
    assert_eq!(f.store.calls("write_block_positions"), 0);
}

#[tokio::test]
async fn test_publish_succeeds_and_invalidates_when_page_list_is_unavailable() {
    let f = fixture();
    let service = f.editor.service().clone();
    assert!(service.published_blocks("experiences").await.unwrap().is_empty());
    f.store.set_operation_failure("list_pages", Some("page list timed out"));

    let published = f.editor.publish(f.blocks[0].id).await.unwrap();

    assert!(published.is_published());
    let public = service.published_blocks("experiences").await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, f.blocks[0].id);
}

#[tokio::test]
async fn test_reorder_reports_success_when_page_list_is_unavailable() {
    let f = fixture();
    let service = f.editor.service().clone();
    service.page_content("experiences").await.unwrap();
    f.store.set_operation_failure("list_pages", Some("page list timed out"));

    let mut session = f.editor.reorder_session(f.page.id).await.unwrap();
    session.begin_drag_at(2).unwrap();
    session.drop_at(0).await.unwrap();

    let expected = vec![f.blocks[2].id, f.blocks[0].id, f.blocks[1].id];
    let local: Vec<Uuid> = session.blocks().iter().map(|b| b.id).collect();
    assert_eq!(local, expected);
    let cached: Vec<Uuid> = service
        .page_content("experiences")
        .await
        .unwrap()
        .blocks
        .iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(cached, expected);
}
