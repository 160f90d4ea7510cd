use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;

/// Lines moved by PageUp/PageDown in the content pane.
const PAGE: u16 = 10;

impl App {
    /// The main entry point for handling keyboard events.
    ///
    /// The language picker captures all input while open; otherwise global
    /// shortcuts are tried before menu and content navigation.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.language_picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        if self.handle_global_shortcuts(key) {
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_menu_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_menu_cursor(1),
            KeyCode::Home => self.menu_cursor_to_start(),
            KeyCode::End => self.menu_cursor_to_end(),
            KeyCode::Enter | KeyCode::Right => self.activate_menu_cursor(),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.content_scroll = self.content_scroll.saturating_add(PAGE);
            }
            KeyCode::PageUp => {
                self.content_scroll = self.content_scroll.saturating_sub(PAGE);
            }
            _ => {}
        }
    }

    /// Handles global keyboard shortcuts.
    /// Returns `true` if a shortcut was handled, `false` otherwise.
    fn handle_global_shortcuts(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => self.should_quit = true,
            (KeyCode::Char('l'), _) => self.open_language_picker(),
            (KeyCode::Char('L'), _) => self.cycle_language(),
            (KeyCode::Char('t'), _) => self.toggle_theme(),
            (KeyCode::Char('r'), _) => self.reload(),
            _ => return false,
        }
        true
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_language_picker(),
            KeyCode::Up | KeyCode::Char('k') => self.move_language_picker(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_language_picker(1),
            KeyCode::Enter => self.confirm_language_picker(),
            _ => {}
        }
    }
}
