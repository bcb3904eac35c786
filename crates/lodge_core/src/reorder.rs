//! Array-move and position renumbering for the block editor.
//!
//! A drop moves one block from its index to the target index; everything
//! else keeps its relative order. After every move the whole page is
//! renumbered `1..=N`.

use crate::Block;
use lodge_error::{EditorError, EditorErrorKind};

/// Move the item at `from` so it ends up at index `to`.
///
/// Removes at `from`, then inserts at `to`, leaving the relative order of
/// every other item unchanged.
///
/// # Examples
///
/// ```
/// use lodge_core::move_item;
///
/// assert_eq!(move_item(&['a', 'b', 'c'], 0, 2).unwrap(), vec!['b', 'c', 'a']);
/// assert_eq!(move_item(&['a', 'b', 'c'], 2, 0).unwrap(), vec!['c', 'a', 'b']);
/// ```
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, EditorError> {
    for index in [from, to] {
        if index >= items.len() {
            return Err(EditorError::new(EditorErrorKind::IndexOutOfRange {
                index,
                len: items.len(),
            }));
        }
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// Rewrite every block's position to its 1-based index.
pub fn renumber_positions(blocks: &mut [Block]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.position = index as i32 + 1;
    }
}

/// Reorder blocks for a drop of index `from` onto index `to`.
///
/// `blocks` must be in display order. Returns `Ok(None)` when the block is
/// dropped onto itself; otherwise the moved list with positions rewritten
/// to `1..=N`.
pub fn reorder_blocks(
    blocks: &[Block],
    from: usize,
    to: usize,
) -> Result<Option<Vec<Block>>, EditorError> {
    if from == to {
        if from >= blocks.len() {
            return Err(EditorError::new(EditorErrorKind::IndexOutOfRange {
                index: from,
                len: blocks.len(),
            }));
        }
        return Ok(None);
    }

    let mut moved = move_item(blocks, from, to)?;
    renumber_positions(&mut moved);
    Ok(Some(moved))
}

/// Whether positions form exactly `1..=N` in order.
pub fn has_contiguous_positions(blocks: &[Block]) -> bool {
    blocks
        .iter()
        .enumerate()
        .all(|(index, block)| block.position == index as i32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_rejected() {
        let err = move_item(&[1, 2], 0, 2).unwrap_err();
        assert_eq!(err.kind, EditorErrorKind::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn adjacent_swap() {
        assert_eq!(move_item(&[1, 2, 3], 1, 2).unwrap(), vec![1, 3, 2]);
        assert_eq!(move_item(&[1, 2, 3], 2, 1).unwrap(), vec![1, 3, 2]);
    }
}
