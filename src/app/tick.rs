use log::{debug, info, warn};

use super::state::{menu_failure, TaskKind};
use super::{App, ContentView, LoadEvent, MenuState};
use crate::content::{placeholder_for, ContentRenderer};
use crate::menu::MenuTree;

impl App {
    /// Called on every tick of the event loop: applies whatever background
    /// loads have finished since the last tick.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    /// Waits until every load in flight has delivered its result.
    pub async fn settle(&mut self) {
        while !self.pending.is_empty() {
            match self.events_rx.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn apply(&mut self, event: LoadEvent) {
        if !self.is_current(&event) {
            debug!("Discarding stale {:?} result", event.kind());
            return;
        }
        self.pending.remove(&event.kind());

        match event {
            LoadEvent::Languages(Ok(languages)) => {
                self.languages = languages;
                match self.languages.first().cloned() {
                    Some(default) => self.set_language(&default.code, &default.path),
                    None => {
                        warn!("languages.yaml declares no language");
                        self.menu = MenuState::Failed(String::from("No languages configured"));
                    }
                }
            }
            LoadEvent::Languages(Err(err)) => {
                warn!("{err}");
                self.menu = MenuState::Failed(err.to_string());
                self.status_message = err.to_string();
            }
            LoadEvent::Menu { result, .. } => match result.map(MenuTree::build) {
                Ok(Ok(tree)) => {
                    info!("Menu ready with {} entries", tree.len());
                    self.menu = MenuState::Ready(tree);
                    self.load_initial();
                }
                Ok(Err(err)) => {
                    warn!("{err}");
                    self.menu = MenuState::Failed(menu_failure(&err));
                    self.status_message = err.to_string();
                }
                Err(err) => {
                    warn!("{err}");
                    self.menu = MenuState::Failed(err.to_string());
                    self.status_message = err.to_string();
                }
            },
            LoadEvent::Ui { result, .. } => match result {
                Ok(strings) => self.ui_strings = Some(strings),
                Err(err) => {
                    warn!("{err}");
                    self.status_message = err.to_string();
                }
            },
            LoadEvent::Content { ticket, result } => {
                self.content = match result {
                    Ok(body) => ContentView::Rendered {
                        text: self.renderer.render_text(&body),
                        file: ticket.file,
                    },
                    Err(err) => {
                        warn!("{err}");
                        ContentView::Placeholder {
                            file: ticket.file,
                            message: placeholder_for(&err),
                        }
                    }
                };
            }
        }
    }

    fn is_current(&self, event: &LoadEvent) -> bool {
        match event {
            LoadEvent::Languages(_) => true,
            LoadEvent::Menu { ticket, .. } | LoadEvent::Ui { ticket, .. } => {
                self.nav.is_current_reload(ticket)
            }
            LoadEvent::Content { ticket, .. } => self.nav.is_current_content(ticket),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::{ContentSource, FetchError, MenuEntry};

    struct EmptySource;

    #[async_trait]
    impl ContentSource for EmptySource {
        fn describe(&self) -> String {
            String::from("empty")
        }

        async fn fetch_text(&self, relative: &str) -> Result<String, FetchError> {
            Err(FetchError::NotFound {
                path: relative.to_string(),
            })
        }
    }

    fn entry(key: &str) -> MenuEntry {
        MenuEntry {
            key: key.to_string(),
            file: format!("{key}.md"),
            branch: None,
            titles: Default::default(),
            detail: None,
        }
    }

    #[tokio::test]
    async fn stale_menu_result_is_ignored() {
        let mut app = App::new(Arc::new(EmptySource), None);
        let stale = app.nav.set_language("fr", "md/fr");
        app.set_language("en", "md/en");

        app.apply(LoadEvent::Menu {
            ticket: stale,
            result: Ok(vec![entry("fr-only")]),
        });

        assert!(matches!(app.menu, MenuState::Loading));
        assert!(app.pending.contains_key(&TaskKind::Menu));
        assert_eq!(app.nav.active_file(), None);
    }

    #[tokio::test]
    async fn stale_content_result_is_ignored() {
        let mut app = App::new(Arc::new(EmptySource), None);
        let ticket = app.nav.set_language("en", "md/en");
        app.apply(LoadEvent::Menu {
            ticket,
            result: Ok(vec![entry("a"), entry("b")]),
        });
        let old = app.nav.select_file("a.md");
        app.select_file("b.md");

        app.apply(LoadEvent::Content {
            ticket: old,
            result: Ok(String::from("# A")),
        });

        assert!(matches!(&app.content, ContentView::Loading { file } if file == "b.md"));
        assert_eq!(app.nav.active_file(), Some("b.md"));
    }

    #[tokio::test]
    async fn current_content_result_is_rendered() {
        let mut app = App::new(Arc::new(EmptySource), None);
        let ticket = app.nav.set_language("en", "md/en");
        app.apply(LoadEvent::Menu {
            ticket,
            result: Ok(vec![entry("a")]),
        });
        let ticket = app.nav.select_file("a.md");

        app.apply(LoadEvent::Content {
            ticket,
            result: Ok(String::from("# A")),
        });

        assert!(matches!(&app.content, ContentView::Rendered { file, .. } if file == "a.md"));
    }
}
