use std::future::Future;

use log::{debug, info, warn};

use super::state::TaskKind;
use super::{App, ContentView, LoadEvent, MenuState};
use crate::navigation::ContentTicket;

// Transitions of the viewer. Each one updates state synchronously and then
// schedules the loads it needs; results arrive through `tick.rs`.
impl App {
    /// Fetches the language list. The first language is activated once it arrives.
    pub fn start(&mut self) {
        info!("Starting viewer on {}", self.loader.source().describe());
        let loader = self.loader.clone();
        self.spawn_load(TaskKind::Languages, async move {
            LoadEvent::Languages(loader.load_languages().await)
        });
    }

    /// Activates the language with `code`, if it was declared.
    pub fn switch_language(&mut self, code: &str) -> bool {
        let Some(language) = self.languages.iter().find(|lang| lang.code == code).cloned() else {
            warn!("Unknown language {code}");
            self.status_message = format!("Unknown language: {code}");
            return false;
        };
        self.set_language(&language.code, &language.path);
        true
    }

    /// Switches to language `code` with documents under `path`, discarding
    /// the current menu, labels and document and reloading them for the new
    /// language. Results of loads issued before the switch are ignored.
    pub fn set_language(&mut self, code: &str, path: &str) {
        let ticket = self.nav.set_language(code, path);

        self.menu = MenuState::Loading;
        self.ui_strings = None;
        self.content = ContentView::Empty;
        self.menu_cursor = 0;
        self.content_scroll = 0;
        self.cancel(TaskKind::Content);
        self.status_message = format!("Language: {}", self.language_name(code));

        let loader = self.loader.clone();
        let menu_ticket = ticket.clone();
        self.spawn_load(TaskKind::Menu, async move {
            LoadEvent::Menu {
                ticket: menu_ticket,
                result: loader.load_menu().await,
            }
        });

        let loader = self.loader.clone();
        self.spawn_load(TaskKind::Ui, async move {
            LoadEvent::Ui {
                ticket,
                result: loader.load_ui().await,
            }
        });
    }

    /// Makes `file` the active document and loads it. The previous document
    /// is cleared immediately so it can never stay on screen.
    pub fn select_file(&mut self, file: &str) {
        let ticket = self.nav.select_file(file);
        self.show_selected(ticket);
    }

    /// Selects the first declared document of the freshly loaded menu.
    pub(crate) fn load_initial(&mut self) {
        let first = self
            .menu
            .tree()
            .and_then(|tree| tree.first_declared())
            .map(|entry| entry.file.clone());
        match self.nav.load_initial(first.as_deref()) {
            Some(ticket) => self.show_selected(ticket),
            None => debug!("Menu is empty; nothing to select"),
        }
    }

    /// Reloads menu, labels and document for the current language.
    pub fn reload(&mut self) {
        let current = self
            .nav
            .language_code()
            .zip(self.nav.content_path())
            .map(|(code, path)| (code.to_string(), path.to_string()));
        match current {
            Some((code, path)) => self.set_language(&code, &path),
            None => self.start(),
        }
    }

    fn show_selected(&mut self, ticket: ContentTicket) {
        self.content = ContentView::Loading {
            file: ticket.file.clone(),
        };
        self.content_scroll = 0;
        self.sync_cursor_to_active();

        let loader = self.loader.clone();
        self.spawn_load(TaskKind::Content, async move {
            let result = loader
                .load_document(&ticket.content_path, &ticket.file)
                .await;
            LoadEvent::Content { ticket, result }
        });
    }

    pub(crate) fn language_name(&self, code: &str) -> String {
        self.languages
            .iter()
            .find(|lang| lang.code == code)
            .map(|lang| lang.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// Runs `load` in the background, replacing any load of the same kind.
    fn spawn_load<F>(&mut self, kind: TaskKind, load: F)
    where
        F: Future<Output = LoadEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            let _ = tx.send(load.await);
        });
        if let Some(previous) = self.pending.insert(kind, handle) {
            debug!("Aborting superseded {kind:?} load");
            previous.abort();
        }
    }

    fn cancel(&mut self, kind: TaskKind) {
        if let Some(handle) = self.pending.remove(&kind) {
            handle.abort();
        }
    }
}
