use log::warn;

use super::App;

// Implementation block for preference-related logic in the App.
impl App {
    /// Flips between the dark and light theme and persists the choice.
    pub fn toggle_theme(&mut self) {
        self.preferences.theme = self.preferences.theme.toggle();
        self.status_message = format!("Theme: {}", self.preferences.theme.label());
        if let Some(path) = self.preferences_path.as_deref()
            && let Err(err) = self.preferences.save(path)
        {
            warn!("Could not save preferences: {err}");
            self.status_message = format!("Theme not saved: {err}");
        }
    }
}
