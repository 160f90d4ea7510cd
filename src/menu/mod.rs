//! The documentation menu: a forest built from `docs.yaml` and the flat,
//! display-ready rows derived from it.

pub mod tree;
pub mod view;

pub use tree::{ExportedNode, MenuError, MenuNode, MenuTree, NodeId, Walk};
pub use view::{menu_rows, Emphasis, MenuRow, INDENT_PER_LEVEL};
