//! Navigation state: which language is active, where its documents live,
//! and which document is selected.
//!
//! The state only changes through [`NavigationState::set_language`],
//! [`NavigationState::select_file`] and [`NavigationState::load_initial`].
//! Each transition that starts asynchronous work hands back a ticket; a
//! result is applied only while its ticket is still current, so a slow
//! response for a superseded request is dropped.

use log::debug;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Ready,
}

/// The observable part of the navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavSnapshot {
    pub phase: Phase,
    pub language_code: Option<String>,
    pub content_path: Option<String>,
    pub active_file: Option<String>,
}

/// Issued by [`NavigationState::set_language`]; guards the menu and UI loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    generation: u64,
    pub language_code: String,
    pub content_path: String,
}

/// Issued by [`NavigationState::select_file`]; guards one document load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTicket {
    generation: u64,
    pub file: String,
    pub content_path: String,
}

pub struct NavigationState {
    snapshot: NavSnapshot,
    reload_generation: u64,
    content_generation: u64,
    observers: watch::Sender<NavSnapshot>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        let (observers, _) = watch::channel(NavSnapshot::default());
        Self {
            snapshot: NavSnapshot::default(),
            reload_generation: 0,
            content_generation: 0,
            observers,
        }
    }

    pub fn snapshot(&self) -> &NavSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    pub fn language_code(&self) -> Option<&str> {
        self.snapshot.language_code.as_deref()
    }

    pub fn content_path(&self) -> Option<&str> {
        self.snapshot.content_path.as_deref()
    }

    pub fn active_file(&self) -> Option<&str> {
        self.snapshot.active_file.as_deref()
    }

    /// Receives a copy of the snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<NavSnapshot> {
        self.observers.subscribe()
    }

    /// Switches language. The selection is cleared and every load issued
    /// under the previous language becomes stale.
    pub fn set_language(&mut self, code: impl Into<String>, path: impl Into<String>) -> ReloadTicket {
        let code = code.into();
        let path = path.into();
        debug!("Switching language to {code} ({path})");

        self.reload_generation += 1;
        self.content_generation += 1;
        self.snapshot.language_code = Some(code.clone());
        self.snapshot.content_path = Some(path.clone());
        self.snapshot.active_file = None;
        self.notify();

        ReloadTicket {
            generation: self.reload_generation,
            language_code: code,
            content_path: path,
        }
    }

    /// Makes `file` the active document. Any document load still in flight
    /// becomes stale, including an earlier load of the same file.
    pub fn select_file(&mut self, file: impl Into<String>) -> ContentTicket {
        let file = file.into();
        debug!("Selecting {file}");

        self.content_generation += 1;
        self.snapshot.active_file = Some(file.clone());
        self.notify();

        ContentTicket {
            generation: self.content_generation,
            file,
            content_path: self.snapshot.content_path.clone().unwrap_or_default(),
        }
    }

    /// Completes a menu load: the state becomes ready and the first declared
    /// document, if any, is selected.
    pub fn load_initial(&mut self, first_file: Option<&str>) -> Option<ContentTicket> {
        self.snapshot.phase = Phase::Ready;
        match first_file {
            Some(file) => Some(self.select_file(file)),
            None => {
                self.notify();
                None
            }
        }
    }

    pub fn is_current_reload(&self, ticket: &ReloadTicket) -> bool {
        ticket.generation == self.reload_generation
    }

    pub fn is_current_content(&self, ticket: &ContentTicket) -> bool {
        ticket.generation == self.content_generation
            && self.snapshot.active_file.as_deref() == Some(ticket.file.as_str())
    }

    fn notify(&self) {
        self.observers.send_replace(self.snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized_and_becomes_ready() {
        let mut nav = NavigationState::new();
        assert_eq!(nav.phase(), Phase::Uninitialized);
        nav.set_language("en", "md/en");
        let ticket = nav.load_initial(Some("intro.md")).unwrap();
        assert_eq!(nav.phase(), Phase::Ready);
        assert_eq!(ticket.content_path, "md/en");
        assert_eq!(nav.active_file(), Some("intro.md"));
    }

    #[test]
    fn language_round_trip_leaves_no_residue() {
        let mut nav = NavigationState::new();
        nav.set_language("en", "md/en");
        nav.load_initial(Some("intro.md"));
        let after_first_en = nav.snapshot().clone();

        nav.set_language("fr", "md/fr");
        nav.load_initial(Some("intro.md"));
        nav.select_file("faq.md");
        nav.set_language("en", "md/en");
        nav.load_initial(Some("intro.md"));

        assert_eq!(nav.snapshot(), &after_first_en);
    }

    #[test]
    fn newer_language_makes_older_reload_stale() {
        let mut nav = NavigationState::new();
        let fr = nav.set_language("fr", "md/fr");
        let en = nav.set_language("en", "md/en");
        assert!(!nav.is_current_reload(&fr));
        assert!(nav.is_current_reload(&en));
    }

    #[test]
    fn language_switch_invalidates_pending_content() {
        let mut nav = NavigationState::new();
        nav.set_language("en", "md/en");
        let pending = nav.select_file("intro.md");
        nav.set_language("fr", "md/fr");
        assert!(!nav.is_current_content(&pending));
        assert_eq!(nav.active_file(), None);
    }

    #[test]
    fn reselecting_same_file_supersedes_previous_load() {
        let mut nav = NavigationState::new();
        nav.set_language("en", "md/en");
        let first = nav.select_file("intro.md");
        let second = nav.select_file("intro.md");
        assert!(!nav.is_current_content(&first));
        assert!(nav.is_current_content(&second));
        assert_eq!(nav.active_file(), Some("intro.md"));
    }

    #[test]
    fn observers_see_each_transition() {
        let mut nav = NavigationState::new();
        let mut rx = nav.subscribe();
        nav.set_language("en", "md/en");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().language_code.as_deref(), Some("en"));

        nav.select_file("intro.md");
        assert_eq!(rx.borrow_and_update().active_file.as_deref(), Some("intro.md"));
    }
}
