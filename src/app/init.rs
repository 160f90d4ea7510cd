use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use super::{App, ContentView, MenuState};
use crate::config::{ConfigLoader, ContentSource};
use crate::content::MarkdownRenderer;
use crate::navigation::NavigationState;
use crate::preferences::Preferences;

impl App {
    /// Creates a viewer reading from `source`.
    ///
    /// Nothing is fetched until [`App::start`] is called. With a
    /// `preferences_path` the theme is read from, and saved back to, that file.
    pub fn new(source: Arc<dyn ContentSource>, preferences_path: Option<PathBuf>) -> Self {
        debug!("Initializing App with source: {}", source.describe());
        let preferences = preferences_path
            .as_deref()
            .map(Preferences::load)
            .unwrap_or_default();

        // Background loads report back through this channel; it is drained on every tick.
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            nav: NavigationState::new(),
            languages: Vec::new(),
            menu: MenuState::Loading,
            ui_strings: None,
            content: ContentView::Empty,
            status_message: format!("Loading {}", source.describe()),
            menu_cursor: 0,
            content_scroll: 0,
            language_picker: None,
            preferences,
            preferences_path,
            loader: ConfigLoader::new(source),
            renderer: MarkdownRenderer::default(),
            events_tx,
            events_rx,
            pending: HashMap::new(),
        }
    }
}
