use super::{MenuTree, NodeId};

/// Columns of indentation per nesting level.
pub const INDENT_PER_LEVEL: u16 = 2;

/// One visible line of the menu, fully resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub id: NodeId,
    pub key: String,
    pub file: String,
    pub title: String,
    pub depth: usize,
    pub active: bool,
}

impl MenuRow {
    pub fn indent(&self) -> u16 {
        (self.depth as u16).saturating_mul(INDENT_PER_LEVEL)
    }

    /// How strongly the row is emphasised: roots are full strength, each
    /// level below fades one step, bottoming out at level three.
    pub fn emphasis(&self) -> Emphasis {
        match self.depth {
            0 => Emphasis::Strong,
            1 => Emphasis::Normal,
            2 => Emphasis::Dim,
            _ => Emphasis::Faint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Strong,
    Normal,
    Dim,
    Faint,
}

/// Flattens the forest into display rows for `lang`.
///
/// At most one row is active: the first, in display order, whose file is
/// `active_file`. Highlighting is recomputed from scratch on every call.
pub fn menu_rows(tree: &MenuTree, lang: &str, active_file: Option<&str>) -> Vec<MenuRow> {
    let active_id = active_file.and_then(|file| tree.find_by_file(file));
    tree.walk()
        .map(|(id, depth)| {
            let entry = &tree.node(id).entry;
            MenuRow {
                id,
                key: entry.key.clone(),
                file: entry.file.clone(),
                title: entry.title(lang).to_string(),
                depth,
                active: Some(id) == active_id,
            }
        })
        .collect()
}
