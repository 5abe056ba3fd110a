use treeview_core::{
    MoveError, TreeItem, checked_move, detach_item, find_parent_and_index, forest_len,
    insert_item_at, move_item,
};

fn item(id: &'static str, children: Vec<TreeItem>) -> TreeItem {
    TreeItem::new(id, id).children(children)
}

fn dump(items: &[TreeItem], depth: usize, out: &mut String) {
    for node in items {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.id);
        out.push('\n');
        dump(&node.children, depth + 1, out);
    }
}

fn tree_string(items: &[TreeItem]) -> String {
    let mut s = String::new();
    dump(items, 0, &mut s);
    s.trim().to_string()
}

fn sample() -> Vec<TreeItem> {
    vec![item("A", vec![item("B", vec![])]), item("C", vec![])]
}

#[test]
fn moves_a_root_into_a_node_as_last_child() {
    let forest = move_item(sample(), "C", "A");
    assert_eq!(
        tree_string(&forest),
        r#"A
  B
  C"#
    );
}

#[test]
fn moved_node_becomes_the_last_child() {
    let forest = vec![
        item("A", vec![item("B", vec![]), item("C", vec![])]),
        item("D", vec![]),
    ];
    let forest = move_item(forest, "D", "A");
    let a = &forest[0];
    assert_eq!(a.children.last().unwrap().id, "D");
}

#[test]
fn subtree_travels_with_the_moved_node() {
    let forest = vec![
        item("A", vec![item("B", vec![item("C", vec![])])]),
        item("D", vec![]),
    ];
    let forest = move_item(forest, "B", "D");
    assert_eq!(
        tree_string(&forest),
        r#"A
D
  B
    C"#
    );
}

#[test]
fn preserves_total_node_count() {
    let forest = vec![
        item("A", vec![item("B", vec![item("C", vec![])])]),
        item("D", vec![item("E", vec![])]),
    ];
    let before = forest_len(&forest);
    let forest = move_item(forest, "E", "B");
    assert_eq!(forest_len(&forest), before);
}

#[test]
fn reapplying_the_same_move_is_a_no_op() {
    let once = move_item(sample(), "C", "A");
    let twice = move_item(once.clone(), "C", "A");
    assert_eq!(once, twice);
}

#[test]
fn missing_source_returns_the_forest_unchanged() {
    let forest = move_item(sample(), "nope", "A");
    assert_eq!(
        tree_string(&forest),
        r#"A
  B
C"#
    );
}

#[test]
fn missing_target_silently_drops_the_detached_node() {
    // Documented caller-contract hazard of the unchecked move.
    let forest = move_item(sample(), "C", "nope");
    assert_eq!(
        tree_string(&forest),
        r#"A
  B"#
    );
}

#[test]
fn checked_move_rejects_what_the_unchecked_move_degrades_on() {
    let mut forest = sample();

    assert_eq!(checked_move(&mut forest, "A", "A"), Err(MoveError::SelfMove));
    assert_eq!(
        checked_move(&mut forest, "nope", "A"),
        Err(MoveError::MissingSource)
    );
    assert_eq!(
        checked_move(&mut forest, "C", "nope"),
        Err(MoveError::MissingTarget)
    );
    assert_eq!(
        checked_move(&mut forest, "A", "B"),
        Err(MoveError::IntoDescendant)
    );

    // Every rejection left the forest exactly as it was.
    assert_eq!(
        tree_string(&forest),
        r#"A
  B
C"#
    );

    checked_move(&mut forest, "C", "A").unwrap();
    assert_eq!(
        tree_string(&forest),
        r#"A
  B
  C"#
    );
}

#[test]
fn detach_records_parent_and_sibling_index() {
    let mut forest = vec![
        item("A", vec![item("B", vec![]), item("C", vec![])]),
        item("D", vec![]),
    ];

    let removed = detach_item(&mut forest, "C").unwrap();
    assert_eq!(removed.item.id, "C");
    assert_eq!(removed.parent_id.as_deref(), Some("A"));
    assert_eq!(removed.index, 1);

    let removed = detach_item(&mut forest, "D").unwrap();
    assert_eq!(removed.parent_id, None);
    assert_eq!(removed.index, 1);

    assert!(detach_item(&mut forest, "missing").is_none());
}

#[test]
fn insert_at_clamps_index_and_falls_back_to_root_for_unknown_parent() {
    let mut forest = sample();

    insert_item_at(&mut forest, Some("A"), 99, item("Z", vec![]));
    assert_eq!(forest[0].children.last().unwrap().id, "Z");

    insert_item_at(&mut forest, Some("missing"), 0, item("Y", vec![]));
    assert_eq!(forest[0].id, "Y");
}

#[test]
fn finds_parent_and_index_anywhere_in_the_forest() {
    let forest = vec![
        item("A", vec![item("B", vec![item("C", vec![])])]),
        item("D", vec![]),
    ];

    assert_eq!(
        find_parent_and_index(&forest, "C"),
        Some((Some("B".to_string()), 0))
    );
    assert_eq!(find_parent_and_index(&forest, "D"), Some((None, 1)));
    assert_eq!(find_parent_and_index(&forest, "missing"), None);
}
