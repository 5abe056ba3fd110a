mod tree;

pub use tree::{DropEvent, TreeEntry, TreeViewState};
