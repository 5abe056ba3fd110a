use std::collections::BTreeSet;

use treeview_core::{
    DropPosition, DropPositionConfig, MoveError, RowRect, TreeItem, can_drop, checked_move,
    detach_item, find_item, find_parent_and_index, insert_item_at, move_candidates,
    resolve_drop_position,
};

/// A visible row: one tree item together with its depth and parent, in
/// top-to-bottom render order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    item: TreeItem,
    depth: usize,
    parent_id: Option<String>,
}

impl TreeEntry {
    #[inline]
    pub fn item(&self) -> &TreeItem {
        &self.item
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.item.id
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.item.is_container()
    }
}

/// A completed drop, reported back so the caller can persist the new forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub dragged_id: String,
    pub target_id: String,
    pub position: DropPosition,
}

#[derive(Debug, Clone, PartialEq)]
struct DropPreview {
    target_id: String,
    position: DropPosition,
}

/// Headless state for a tree view: the forest itself, the flattened visible
/// rows, expansion and selection, and the lifecycle of an in-flight drag.
///
/// Event handlers feed pointer geometry in; the state owns the forest and
/// applies legal moves to it. After a [`DropEvent`] the caller should read
/// [`items`](Self::items) as the new source of truth.
pub struct TreeViewState {
    items: Vec<TreeItem>,
    entries: Vec<TreeEntry>,
    expanded_ids: BTreeSet<String>,
    selected_id: Option<String>,
    multi_select: bool,
    selected_ids: BTreeSet<String>,
    drop_config: DropPositionConfig,
    dragged_id: Option<String>,
    drop_preview: Option<DropPreview>,
}

impl TreeViewState {
    pub fn new(items: impl Into<Vec<TreeItem>>) -> Self {
        let mut state = Self {
            items: items.into(),
            entries: Vec::new(),
            expanded_ids: BTreeSet::new(),
            selected_id: None,
            multi_select: false,
            selected_ids: BTreeSet::new(),
            drop_config: DropPositionConfig::default(),
            dragged_id: None,
            drop_preview: None,
        };
        state.rebuild_entries();
        state
    }

    /// Override the row bands used to resolve drop positions.
    pub fn drop_config(mut self, config: DropPositionConfig) -> Self {
        self.drop_config = config;
        self
    }

    pub fn multi_select(mut self, multi_select: bool) -> Self {
        self.multi_select = multi_select;
        self
    }

    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    /// Replace the forest, resetting selection and any in-flight drag.
    pub fn set_items(&mut self, items: impl Into<Vec<TreeItem>>) {
        self.items = items.into();
        self.selected_id = None;
        self.selected_ids.clear();
        self.dragged_id = None;
        self.drop_preview = None;
        self.rebuild_entries();
    }

    /// The visible rows: roots plus the children of expanded containers.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    fn rebuild_entries(&mut self) {
        self.entries.clear();
        collect_entries(&mut self.entries, &self.expanded_ids, &self.items, 0, None);
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_ids.contains(id)
    }

    /// Expand or collapse a container. No-op for leaves and unknown ids.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        let Some(item) = find_item(&self.items, id) else {
            return;
        };
        if !item.is_container() {
            return;
        }

        if expanded {
            self.expanded_ids.insert(id.to_string());
        } else {
            self.expanded_ids.remove(id);
        }
        self.rebuild_entries();
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        self.set_expanded(id, !self.is_expanded(id));
    }

    /// Select a single row. Returns false for unknown or disabled items.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(item) = find_item(&self.items, id) else {
            return false;
        };
        if item.is_disabled() {
            return false;
        }

        self.selected_id = Some(id.to_string());
        if self.multi_select {
            self.selected_ids.insert(id.to_string());
        }
        true
    }

    /// Toggle membership in the multi-selection. Returns the new selected
    /// state, or false when multi-select is off or the item refuses selection.
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        if !self.multi_select {
            return false;
        }
        let Some(item) = find_item(&self.items, id) else {
            return false;
        };
        if item.is_disabled() {
            return false;
        }

        if self.selected_ids.remove(id) {
            if self.selected_id.as_deref() == Some(id) {
                self.selected_id = None;
            }
            false
        } else {
            self.selected_ids.insert(id.to_string());
            self.selected_id = Some(id.to_string());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selected_ids.clear();
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_ids(&self) -> &BTreeSet<String> {
        &self.selected_ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id.as_deref() == Some(id) || self.selected_ids.contains(id)
    }

    pub fn selected_entry(&self) -> Option<&TreeEntry> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.entry(id))
    }

    /// Begin dragging an item. Returns false for unknown or disabled items,
    /// leaving any previous drag untouched.
    pub fn drag_start(&mut self, id: &str) -> bool {
        let Some(item) = find_item(&self.items, id) else {
            return false;
        };
        if item.is_disabled() {
            return false;
        }

        self.dragged_id = Some(id.to_string());
        self.drop_preview = None;
        self.selected_id = Some(id.to_string());
        true
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.dragged_id.as_deref()
    }

    /// The drop currently previewed, if the hovered row admits one.
    pub fn drop_preview(&self) -> Option<(&str, DropPosition)> {
        self.drop_preview
            .as_ref()
            .map(|preview| (preview.target_id.as_str(), preview.position))
    }

    /// Update the drop preview while the pointer hovers `target_id`'s row.
    /// Returns the resolved position when the drop would be legal, otherwise
    /// clears the preview and returns None.
    pub fn drag_over(
        &mut self,
        target_id: &str,
        pointer_y: f32,
        row: RowRect,
    ) -> Option<DropPosition> {
        let dragged_id = self.dragged_id.clone()?;
        let Some(dragged) = find_item(&self.items, &dragged_id) else {
            self.drop_preview = None;
            return None;
        };
        let Some(target) = find_item(&self.items, target_id) else {
            self.drop_preview = None;
            return None;
        };

        let position = resolve_drop_position(pointer_y, row, target, &self.drop_config);
        if !can_drop(dragged, target, position) {
            self.drop_preview = None;
            return None;
        }

        self.drop_preview = Some(DropPreview {
            target_id: target_id.to_string(),
            position,
        });
        Some(position)
    }

    /// Abandon the drag, leaving the forest untouched.
    pub fn cancel_drag(&mut self) {
        self.dragged_id = None;
        self.drop_preview = None;
    }

    /// Commit the previewed drop. Inside drops append the dragged item as the
    /// target's last child and expand the target; Above/Below drops insert it
    /// as the target's sibling. Ends the drag session either way and returns
    /// None (forest untouched) when no legal preview was pending.
    pub fn apply_drop(&mut self) -> Option<DropEvent> {
        let dragged_id = self.dragged_id.take()?;
        let preview = self.drop_preview.take()?;

        // The tree may have changed since the preview was recorded.
        let legal = match (
            find_item(&self.items, &dragged_id),
            find_item(&self.items, &preview.target_id),
        ) {
            (Some(dragged), Some(target)) => can_drop(dragged, target, preview.position),
            _ => false,
        };
        if !legal {
            return None;
        }

        let detached = detach_item(&mut self.items, &dragged_id)?;
        match preview.position {
            DropPosition::Inside => {
                let Some(target) = find_item(&self.items, &preview.target_id) else {
                    insert_item_at(
                        &mut self.items,
                        detached.parent_id.as_deref(),
                        detached.index,
                        detached.item,
                    );
                    return None;
                };
                let index = target.children.len();
                insert_item_at(
                    &mut self.items,
                    Some(&preview.target_id),
                    index,
                    detached.item,
                );
                self.expanded_ids.insert(preview.target_id.clone());
            }
            DropPosition::Above | DropPosition::Below => {
                let Some((parent_id, target_ix)) =
                    find_parent_and_index(&self.items, &preview.target_id)
                else {
                    insert_item_at(
                        &mut self.items,
                        detached.parent_id.as_deref(),
                        detached.index,
                        detached.item,
                    );
                    return None;
                };
                let index = if preview.position == DropPosition::Below {
                    target_ix + 1
                } else {
                    target_ix
                };
                insert_item_at(&mut self.items, parent_id.as_deref(), index, detached.item);
            }
        }

        self.selected_id = Some(dragged_id.clone());
        self.rebuild_entries();
        Some(DropEvent {
            dragged_id,
            target_id: preview.target_id,
            position: preview.position,
        })
    }

    /// Items eligible as a new parent for `exclude_id`, for a "move to"
    /// picker.
    pub fn move_candidates(&self, exclude_id: &str) -> Vec<&TreeItem> {
        move_candidates(&self.items, exclude_id)
    }

    /// Reparent `source_id` as the last child of `target_id`, expanding the
    /// target. The picker counterpart of a drag: same legality rules, but
    /// rejections are reported instead of previewed away.
    pub fn reparent(&mut self, source_id: &str, target_id: &str) -> Result<(), MoveError> {
        checked_move(&mut self.items, source_id, target_id)?;
        self.expanded_ids.insert(target_id.to_string());
        self.rebuild_entries();
        Ok(())
    }
}

fn collect_entries(
    entries: &mut Vec<TreeEntry>,
    expanded_ids: &BTreeSet<String>,
    items: &[TreeItem],
    depth: usize,
    parent_id: Option<&str>,
) {
    for item in items {
        entries.push(TreeEntry {
            item: item.clone(),
            depth,
            parent_id: parent_id.map(str::to_string),
        });

        if expanded_ids.contains(&item.id) {
            collect_entries(entries, expanded_ids, &item.children, depth + 1, Some(&item.id));
        }
    }
}
