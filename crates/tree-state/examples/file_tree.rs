use treeview_core::{RowRect, TreeItem};
use treeview_state::TreeViewState;

const ROW: RowRect = RowRect {
    top: 0.0,
    height: 28.0,
};

fn dump(items: &[TreeItem], depth: usize) {
    for node in items {
        let marker = if node.is_container() { "+" } else { "-" };
        println!("{}{} {} ({})", "  ".repeat(depth), marker, node.label, node.id);
        dump(&node.children, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    let items: Vec<TreeItem> = serde_json::from_str(
        r#"[
            {
                "id": "docs",
                "label": "Documents",
                "data": { "type": "folder" },
                "children": [
                    { "id": "resume", "label": "resume.pdf" },
                    { "id": "notes", "label": "notes.md" }
                ]
            },
            {
                "id": "pics",
                "label": "Pictures",
                "data": { "type": "folder" },
                "children": [
                    { "id": "cat", "label": "cat.jpg" }
                ]
            },
            { "id": "todo", "label": "todo.txt" }
        ]"#,
    )?;

    let mut state = TreeViewState::new(items);
    state.set_expanded("docs", true);

    println!("== before ==");
    dump(state.items(), 0);

    // Drag todo.txt over the middle of the Pictures row: that nests it.
    state.drag_start("todo");
    let position = state
        .drag_over("pics", ROW.top + ROW.height * 0.5, ROW)
        .expect("drop should be legal");
    println!("\nhovering Pictures at mid-row resolves to: {position:?}");

    let event = state.apply_drop().expect("previewed drop should apply");
    println!(
        "moved {:?} {:?} {:?}",
        event.dragged_id, event.position, event.target_id
    );

    println!("\n== after drop ==");
    dump(state.items(), 0);

    println!("\nnew parents offered for notes.md:");
    for candidate in state.move_candidates("notes") {
        println!("  {}", candidate.label);
    }

    // The picker path: move notes.md under Pictures directly.
    state.reparent("notes", "pics")?;
    println!("\n== after reparent ==");
    dump(state.items(), 0);

    Ok(())
}
