use std::fmt;

use crate::item::{TreeItem, find_item, is_descendant};

/// Why a checked move was rejected. The forest is left untouched in every
/// rejected case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    SelfMove,
    MissingSource,
    MissingTarget,
    IntoDescendant,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::SelfMove => write!(f, "cannot move an item into itself"),
            MoveError::MissingSource => write!(f, "source item not found in the tree"),
            MoveError::MissingTarget => write!(f, "target item not found in the tree"),
            MoveError::IntoDescendant => {
                write!(f, "cannot move an item into its own descendant")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// An item taken out of the forest, with enough context to put it back where
/// it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedItem {
    pub item: TreeItem,
    pub parent_id: Option<String>,
    pub index: usize,
}

/// Remove the item with `target_id` from the forest, wherever it sits.
pub fn detach_item(items: &mut Vec<TreeItem>, target_id: &str) -> Option<DetachedItem> {
    detach_inner(items, target_id, None)
}

fn detach_inner(
    items: &mut Vec<TreeItem>,
    target_id: &str,
    parent_id: Option<&str>,
) -> Option<DetachedItem> {
    for index in 0..items.len() {
        if items[index].id == target_id {
            let item = items.remove(index);
            return Some(DetachedItem {
                item,
                parent_id: parent_id.map(str::to_string),
                index,
            });
        }
    }

    for node in items.iter_mut() {
        let parent = node.id.clone();
        if let Some(found) = detach_inner(&mut node.children, target_id, Some(&parent)) {
            return Some(found);
        }
    }

    None
}

/// Insert `item` at `index` under `parent_id` (or at root level for `None`).
/// Indices past the end clamp to an append; an unknown parent falls back to a
/// root-level insert so the item is never lost.
pub fn insert_item_at(
    items: &mut Vec<TreeItem>,
    parent_id: Option<&str>,
    index: usize,
    item: TreeItem,
) {
    match parent_id {
        None => {
            let ix = index.min(items.len());
            items.insert(ix, item);
        }
        Some(parent_id) => {
            let mut item = Some(item);
            if !insert_into_parent(items, parent_id, index, &mut item) {
                if let Some(item) = item.take() {
                    let ix = index.min(items.len());
                    items.insert(ix, item);
                }
            }
        }
    }
}

fn insert_into_parent(
    items: &mut Vec<TreeItem>,
    parent_id: &str,
    index: usize,
    item: &mut Option<TreeItem>,
) -> bool {
    for node in items.iter_mut() {
        if node.id == parent_id {
            let Some(item) = item.take() else {
                return true;
            };
            let ix = index.min(node.children.len());
            node.children.insert(ix, item);
            return true;
        }

        if insert_into_parent(&mut node.children, parent_id, index, item) {
            return true;
        }
    }

    false
}

/// Locate an item's parent id (`None` for a root) and its index among its
/// siblings.
pub fn find_parent_and_index(items: &[TreeItem], target_id: &str) -> Option<(Option<String>, usize)> {
    find_parent_inner(items, target_id, None)
}

fn find_parent_inner(
    items: &[TreeItem],
    target_id: &str,
    parent_id: Option<&str>,
) -> Option<(Option<String>, usize)> {
    for (index, node) in items.iter().enumerate() {
        if node.id == target_id {
            return Some((parent_id.map(str::to_string), index));
        }
        if let Some(found) = find_parent_inner(&node.children, target_id, Some(&node.id)) {
            return Some(found);
        }
    }
    None
}

/// Detach the item with `source_id` and reattach it as the last child of the
/// item with `target_id`, subtree carried along intact.
///
/// This is the unchecked form: the caller must have validated the move with
/// [`can_drop`](crate::can_drop) first. A missing source leaves the forest
/// unchanged; a missing target silently drops the detached item. Use
/// [`checked_move`] where either degradation is unacceptable.
pub fn move_item(mut items: Vec<TreeItem>, source_id: &str, target_id: &str) -> Vec<TreeItem> {
    let Some(detached) = detach_item(&mut items, source_id) else {
        return items;
    };

    let mut dragged = Some(detached.item);
    append_to_target(&mut items, target_id, &mut dragged);
    items
}

fn append_to_target(items: &mut [TreeItem], target_id: &str, dragged: &mut Option<TreeItem>) {
    for node in items.iter_mut() {
        if node.id == target_id {
            if let Some(item) = dragged.take() {
                node.children.push(item);
            }
            return;
        }

        append_to_target(&mut node.children, target_id, dragged);
        if dragged.is_none() {
            return;
        }
    }
}

/// [`move_item`] with the legality checks fused in: self-moves, moves into a
/// descendant, and unknown ids are rejected up front, before anything is
/// detached.
pub fn checked_move(
    items: &mut Vec<TreeItem>,
    source_id: &str,
    target_id: &str,
) -> Result<(), MoveError> {
    if source_id == target_id {
        return Err(MoveError::SelfMove);
    }

    let Some(source) = find_item(items, source_id) else {
        return Err(MoveError::MissingSource);
    };
    if is_descendant(source, target_id) {
        return Err(MoveError::IntoDescendant);
    }
    if find_item(items, target_id).is_none() {
        return Err(MoveError::MissingTarget);
    }

    let Some(detached) = detach_item(items, source_id) else {
        return Err(MoveError::MissingSource);
    };

    let mut dragged = Some(detached.item);
    append_to_target(items, target_id, &mut dragged);
    if let Some(item) = dragged.take() {
        // The target was validated above, so reaching here means the tree
        // changed underneath us. Restore the item to its original slot.
        insert_item_at(items, detached.parent_id.as_deref(), detached.index, item);
        return Err(MoveError::MissingTarget);
    }

    Ok(())
}
