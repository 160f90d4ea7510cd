use log::debug;

use super::App;

// Implementation block for the language picker overlay.
impl App {
    /// Opens the language picker with the active language highlighted.
    pub(crate) fn open_language_picker(&mut self) {
        if self.languages.is_empty() {
            self.status_message = String::from("No languages loaded");
            return;
        }
        let current = self
            .nav
            .language_code()
            .and_then(|code| self.languages.iter().position(|lang| lang.code == code))
            .unwrap_or(0);
        debug!("Opening language picker");
        self.language_picker = Some(current);
    }

    pub(crate) fn close_language_picker(&mut self) {
        self.language_picker = None;
    }

    pub(crate) fn move_language_picker(&mut self, delta: isize) {
        let count = self.languages.len();
        if let Some(index) = self.language_picker.as_mut()
            && count > 0
        {
            *index = index.saturating_add_signed(delta).min(count - 1);
        }
    }

    /// Switches to the highlighted language and closes the picker.
    pub(crate) fn confirm_language_picker(&mut self) {
        let Some(index) = self.language_picker.take() else {
            return;
        };
        if let Some(language) = self.languages.get(index).cloned() {
            self.set_language(&language.code, &language.path);
        }
    }

    /// Moves to the next declared language, wrapping around.
    pub(crate) fn cycle_language(&mut self) {
        if self.languages.is_empty() {
            return;
        }
        let next = self
            .nav
            .language_code()
            .and_then(|code| self.languages.iter().position(|lang| lang.code == code))
            .map(|index| (index + 1) % self.languages.len())
            .unwrap_or(0);
        let language = self.languages[next].clone();
        self.set_language(&language.code, &language.path);
    }
}
