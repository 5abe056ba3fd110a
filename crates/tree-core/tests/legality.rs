use treeview_core::{DropPosition, TreeItem, can_drop, is_descendant};

fn sample() -> TreeItem {
    TreeItem::new("root", "Root").child(
        TreeItem::new("docs", "Docs")
            .child(TreeItem::new("readme", "Readme"))
            .child(TreeItem::new("guide", "Guide")),
    )
}

#[test]
fn self_drop_is_never_allowed() {
    let node = sample();
    for position in [DropPosition::Above, DropPosition::Below, DropPosition::Inside] {
        assert!(!can_drop(&node, &node, position));
    }
}

#[test]
fn inside_requires_a_container_target() {
    let dragged = TreeItem::new("x", "X");
    let leaf = TreeItem::new("leaf", "Leaf");

    assert!(!can_drop(&dragged, &leaf, DropPosition::Inside));
    assert!(can_drop(&dragged, &leaf, DropPosition::Above));
    assert!(can_drop(&dragged, &leaf, DropPosition::Below));

    // Any of the three container signals is enough.
    assert!(can_drop(
        &dragged,
        &TreeItem::folder("f", "Folder"),
        DropPosition::Inside
    ));
    assert!(can_drop(
        &dragged,
        &TreeItem::new("p", "Parent").child(TreeItem::new("c", "Child")),
        DropPosition::Inside
    ));
    assert!(can_drop(
        &dragged,
        &TreeItem::new("e", "Empty").expandable(true),
        DropPosition::Inside
    ));
}

#[test]
fn dropping_onto_a_descendant_is_rejected_at_every_position() {
    let dragged = sample();
    let target = TreeItem::new("guide", "Guide");
    for position in [DropPosition::Above, DropPosition::Below, DropPosition::Inside] {
        assert!(!can_drop(&dragged, &target, position));
    }
}

#[test]
fn descendant_test_scans_the_whole_subtree() {
    let node = sample();
    assert!(is_descendant(&node, "docs"));
    assert!(is_descendant(&node, "readme"));
    assert!(is_descendant(&node, "guide"));
    // The node itself is not its own descendant.
    assert!(!is_descendant(&node, "root"));
    assert!(!is_descendant(&node, "missing"));
}

#[test]
fn descendant_test_survives_deep_nesting() {
    let mut node = TreeItem::new("0", "0");
    for depth in 1..50_000 {
        node = TreeItem::new(depth.to_string(), depth.to_string()).child(node);
    }
    assert!(is_descendant(&node, "0"));
    assert!(!is_descendant(&node, "missing"));

    // Dismantle iteratively; the recursive drop glue would blow the stack on
    // a chain this deep.
    let mut stack = vec![node];
    while let Some(mut n) = stack.pop() {
        stack.append(&mut n.children);
    }
}
