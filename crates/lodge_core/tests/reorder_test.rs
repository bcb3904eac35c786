use lodge_core::{Block, BlockKind, has_contiguous_positions, reorder_blocks};
use serde_json::json;
use uuid::Uuid;

fn page_blocks(count: usize) -> Vec<Block> {
    let page_id = Uuid::new_v4();
    (0..count)
        .map(|i| {
            Block::draft(
                page_id,
                BlockKind::RichText,
                i as i32 + 1,
                json!({"body": format!("block {}", i + 1)}),
            )
        })
        .collect()
}

fn ids(blocks: &[Block]) -> Vec<Uuid> {
    blocks.iter().map(|b| b.id).collect()
}

#[test]
fn dragging_first_to_last_rotates_and_renumbers() {
    let blocks = page_blocks(3);
    let (b1, b2, b3) = (blocks[0].id, blocks[1].id, blocks[2].id);

    let reordered = reorder_blocks(&blocks, 0, 2).unwrap().unwrap();

    assert_eq!(ids(&reordered), vec![b2, b3, b1]);
    let positions: Vec<i32> = reordered.iter().map(|b| b.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn dropping_on_self_is_a_no_op() {
    let blocks = page_blocks(3);
    let before = blocks.clone();

    assert!(reorder_blocks(&blocks, 1, 1).unwrap().is_none());
    assert_eq!(blocks, before);
}

#[test]
fn every_move_yields_contiguous_positions() {
    let blocks = page_blocks(5);
    for from in 0..blocks.len() {
        for to in 0..blocks.len() {
            if from == to {
                continue;
            }
            let reordered = reorder_blocks(&blocks, from, to).unwrap().unwrap();
            assert!(
                has_contiguous_positions(&reordered),
                "gap after moving {} to {}",
                from,
                to
            );
            assert_eq!(reordered[to].id, blocks[from].id);
        }
    }
}

#[test]
fn renumbering_repairs_gapped_positions() {
    let mut blocks = page_blocks(3);
    blocks[0].position = 4;
    blocks[1].position = 9;
    blocks[2].position = 12;
    assert!(!has_contiguous_positions(&blocks));

    let reordered = reorder_blocks(&blocks, 2, 0).unwrap().unwrap();
    assert!(has_contiguous_positions(&reordered));
}

#[test]
fn out_of_range_drop_is_an_error() {
    let blocks = page_blocks(2);
    assert!(reorder_blocks(&blocks, 0, 5).is_err());
    assert!(reorder_blocks(&blocks, 7, 7).is_err());
}
