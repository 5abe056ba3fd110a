use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque per-node payload. The `"type"` key participates in the container
/// predicate: `"folder"`-typed items accept children even while empty.
pub type ItemData = BTreeMap<String, Value>;

/// A labeled tree node with exclusively owned, ordered children.
///
/// A forest of `TreeItem`s must be a strict rooted forest: every `id` is
/// unique within one snapshot and no node is its own descendant. The mutation
/// entry points in this crate preserve that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeItem>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "ItemData::is_empty")]
    pub data: ItemData,
    #[serde(default)]
    pub is_expandable: bool,
}

impl TreeItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            disabled: false,
            data: ItemData::default(),
            is_expandable: false,
        }
    }

    /// A `"folder"`-typed item, i.e. a container even with no children.
    pub fn folder(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label).data("type", Value::String("folder".to_string()))
    }

    pub fn child(mut self, child: TreeItem) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<TreeItem>>) -> Self {
        self.children.extend(children.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark the item as a container even while its children are empty.
    pub fn expandable(mut self, expandable: bool) -> Self {
        self.is_expandable = expandable;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Whether this item can hold children in the UI sense: `"folder"`-typed
    /// payload, a non-empty children list, or an explicit expandable flag.
    pub fn is_container(&self) -> bool {
        self.data.get("type").and_then(Value::as_str) == Some("folder")
            || !self.children.is_empty()
            || self.is_expandable
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Number of nodes in this subtree, the item itself included.
    pub fn subtree_len(&self) -> usize {
        1 + forest_len(&self.children)
    }
}

/// Total node count across all roots.
pub fn forest_len(items: &[TreeItem]) -> usize {
    items.iter().map(TreeItem::subtree_len).sum()
}

/// Whether `target_id` occurs anywhere below `node` (the node itself does not
/// count). Runs on an explicit work stack so pathologically deep trees cannot
/// exhaust the call stack.
pub fn is_descendant(node: &TreeItem, target_id: &str) -> bool {
    let mut stack: Vec<&TreeItem> = node.children.iter().collect();
    while let Some(current) = stack.pop() {
        if current.id == target_id {
            return true;
        }
        stack.extend(current.children.iter());
    }
    false
}

/// Items that may serve as a new parent for the excluded item, in document
/// order. The excluded item, everything inside it, and every ancestor whose
/// subtree contains it are filtered out; children of a filtered item are not
/// visited.
pub fn move_candidates<'a>(items: &'a [TreeItem], exclude_id: &str) -> Vec<&'a TreeItem> {
    let mut result = Vec::new();
    let mut stack: Vec<&TreeItem> = items.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == exclude_id || is_descendant(node, exclude_id) {
            continue;
        }
        result.push(node);
        stack.extend(node.children.iter().rev());
    }
    result
}

/// Find an item anywhere in the forest by id.
pub fn find_item<'a>(items: &'a [TreeItem], target_id: &str) -> Option<&'a TreeItem> {
    for node in items {
        if node.id == target_id {
            return Some(node);
        }
        if let Some(found) = find_item(&node.children, target_id) {
            return Some(found);
        }
    }
    None
}
