use serde::{Deserialize, Serialize};

use crate::item::{TreeItem, is_descendant};

/// Where a dragged item would land relative to the hovered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Above,
    Below,
    Inside,
}

/// Vertical extent of a rendered row, in the same coordinate space as the
/// pointer position handed to [`resolve_drop_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRect {
    pub top: f32,
    pub height: f32,
}

impl RowRect {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// Tunable row bands for [`resolve_drop_position`], as fractions of row
/// height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPositionConfig {
    pub above_threshold: f32,
    pub below_threshold: f32,
}

impl Default for DropPositionConfig {
    fn default() -> Self {
        Self {
            above_threshold: 0.30,
            below_threshold: 0.70,
        }
    }
}

// Bottom fraction of a container row that still reads as "insert below",
// so an item can be dropped after a folder instead of into it.
const CONTAINER_BOTTOM_EDGE: f32 = 0.9;

/// Resolve the drop position from the pointer's vertical offset within the
/// hovered row.
///
/// The row splits into three bands: the top band inserts above, the middle
/// band nests inside, and the bottom band inserts below. For container rows
/// the lower band still nests, except for the bottom 10% of the row which is
/// reserved for "insert as next sibling". Pure in all inputs; out-of-range
/// pointer positions fall into the outer bands without clamping.
pub fn resolve_drop_position(
    pointer_y: f32,
    row: RowRect,
    target: &TreeItem,
    config: &DropPositionConfig,
) -> DropPosition {
    let relative_y = (pointer_y - row.top) / row.height;

    if relative_y < config.above_threshold {
        return DropPosition::Above;
    }

    if relative_y > config.below_threshold {
        if target.is_container() && relative_y < CONTAINER_BOTTOM_EDGE {
            return DropPosition::Inside;
        }
        return DropPosition::Below;
    }

    DropPosition::Inside
}

/// Whether dropping `dragged` at `position` relative to `target` keeps the
/// forest well formed: no self-drop, no nesting into a non-container, and no
/// reattaching an item underneath its own subtree.
pub fn can_drop(dragged: &TreeItem, target: &TreeItem, position: DropPosition) -> bool {
    if dragged.id == target.id {
        return false;
    }

    if position == DropPosition::Inside && !target.is_container() {
        return false;
    }

    !is_descendant(dragged, &target.id)
}
