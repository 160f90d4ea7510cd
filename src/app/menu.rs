use log::debug;

use super::App;
use crate::config::MenuEntry;
use crate::menu::{menu_rows, MenuRow};

// Implementation block for menu-related logic in the App.
impl App {
    /// The menu as display rows for the active language and document.
    pub fn menu_rows(&self) -> Vec<MenuRow> {
        match self.menu.tree() {
            Some(tree) => menu_rows(
                tree,
                self.nav.language_code().unwrap_or_default(),
                self.nav.active_file(),
            ),
            None => Vec::new(),
        }
    }

    /// The menu entry for the active document, if it is in the menu.
    pub fn active_entry(&self) -> Option<&MenuEntry> {
        let tree = self.menu.tree()?;
        let id = tree.find_by_file(self.nav.active_file()?)?;
        Some(&tree.node(id).entry)
    }

    /// The styled detail text of the active document.
    pub fn active_detail(&self) -> Option<&str> {
        self.active_entry()?
            .detail
            .as_deref()
            .filter(|detail| !detail.trim().is_empty())
    }

    /// Moves the menu cursor by `delta` rows, clamped to the menu.
    pub(crate) fn move_menu_cursor(&mut self, delta: isize) {
        let count = self.menu.tree().map(|tree| tree.len()).unwrap_or(0);
        if count == 0 {
            self.menu_cursor = 0;
            return;
        }
        let next = self.menu_cursor.saturating_add_signed(delta);
        self.menu_cursor = next.min(count - 1);
    }

    pub(crate) fn menu_cursor_to_start(&mut self) {
        self.menu_cursor = 0;
    }

    pub(crate) fn menu_cursor_to_end(&mut self) {
        let count = self.menu.tree().map(|tree| tree.len()).unwrap_or(0);
        self.menu_cursor = count.saturating_sub(1);
    }

    /// Opens the document under the menu cursor.
    pub(crate) fn activate_menu_cursor(&mut self) {
        let file = self
            .menu_rows()
            .into_iter()
            .nth(self.menu_cursor)
            .map(|row| row.file);
        if let Some(file) = file {
            debug!("Menu activation: {file}");
            self.select_file(&file);
        }
    }

    /// Puts the cursor on the highlighted row.
    pub(crate) fn sync_cursor_to_active(&mut self) {
        if let Some(position) = self.menu_rows().iter().position(|row| row.active) {
            self.menu_cursor = position;
        }
    }
}
