//! Defines the core state structures for the viewer.
//!
//! `App` owns the navigation state, the current menu forest, the rendered
//! document and every background load still in flight. Rendering code only
//! reads it; transitions go through the methods in `actions.rs`.

use std::collections::HashMap;
use std::path::PathBuf;

use ratatui::text::Text;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::config::{
    ConfigError, ConfigLoader, FetchError, LanguageDescriptor, MenuEntry, UiStrings,
};
use crate::content::MarkdownRenderer;
use crate::menu::{MenuError, MenuTree};
use crate::navigation::{ContentTicket, NavigationState, ReloadTicket};
use crate::preferences::Preferences;

/// The main application state.
pub struct App {
    // --- Core State ---
    /// Flag to indicate if the application should quit.
    pub should_quit: bool,
    /// Active language, content path and document.
    pub nav: NavigationState,
    /// Languages from `languages.yaml`, in declaration order.
    pub languages: Vec<LanguageDescriptor>,
    /// The menu for the active language.
    pub menu: MenuState,
    /// UI labels for the active language, once loaded.
    pub ui_strings: Option<UiStrings>,
    /// The document shown in the content pane.
    pub content: ContentView,

    // --- UI & Layout ---
    /// The message currently displayed in the status bar.
    pub status_message: String,
    /// Row of the menu the keyboard cursor is on.
    pub menu_cursor: usize,
    /// First visible line of the content pane.
    pub content_scroll: u16,
    /// Highlighted row of the language picker while it is open.
    pub language_picker: Option<usize>,
    pub preferences: Preferences,
    /// Where the theme is persisted; `None` keeps it in memory only.
    pub preferences_path: Option<PathBuf>,

    // --- Internal State ---
    pub(crate) loader: ConfigLoader,
    pub(crate) renderer: MarkdownRenderer,
    pub(crate) events_tx: UnboundedSender<LoadEvent>,
    pub(crate) events_rx: UnboundedReceiver<LoadEvent>,
    /// At most one load of each kind runs at a time; starting another aborts it.
    pub(crate) pending: HashMap<TaskKind, JoinHandle<()>>,
}

/// The menu pane's content.
#[derive(Debug)]
pub enum MenuState {
    Loading,
    Ready(MenuTree),
    /// The menu could not be built; the message is shown in place of it.
    Failed(String),
}

impl MenuState {
    pub fn tree(&self) -> Option<&MenuTree> {
        match self {
            MenuState::Ready(tree) => Some(tree),
            _ => None,
        }
    }
}

/// The content pane's content.
#[derive(Debug, Clone, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Loading {
        file: String,
    },
    Rendered {
        file: String,
        text: Text<'static>,
    },
    /// The document could not be fetched.
    Placeholder {
        file: String,
        message: &'static str,
    },
}

impl ContentView {
    pub fn file(&self) -> Option<&str> {
        match self {
            ContentView::Empty => None,
            ContentView::Loading { file }
            | ContentView::Rendered { file, .. }
            | ContentView::Placeholder { file, .. } => Some(file),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ContentView::Placeholder { message, .. } => Some(*message),
            _ => None,
        }
    }
}

/// Results delivered by background loads.
#[derive(Debug)]
pub(crate) enum LoadEvent {
    Languages(Result<Vec<LanguageDescriptor>, ConfigError>),
    Menu {
        ticket: ReloadTicket,
        result: Result<Vec<MenuEntry>, ConfigError>,
    },
    Ui {
        ticket: ReloadTicket,
        result: Result<UiStrings, ConfigError>,
    },
    Content {
        ticket: ContentTicket,
        result: Result<String, FetchError>,
    },
}

impl LoadEvent {
    pub(crate) fn kind(&self) -> TaskKind {
        match self {
            LoadEvent::Languages(_) => TaskKind::Languages,
            LoadEvent::Menu { .. } => TaskKind::Menu,
            LoadEvent::Ui { .. } => TaskKind::Ui,
            LoadEvent::Content { .. } => TaskKind::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TaskKind {
    Languages,
    Menu,
    Ui,
    Content,
}

/// Turns a menu build failure into the text shown in the menu pane.
pub(crate) fn menu_failure(error: &MenuError) -> String {
    format!("Invalid menu: {error}")
}
