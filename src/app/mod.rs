//! The `app` module is the controller of the viewer.
//!
//! It owns the navigation state and the loaded menu, schedules background
//! loads through the configured content source, and turns keyboard input into
//! navigation transitions. Rendering lives in `crate::ui` and only reads the
//! state kept here.

/// `actions`: language switching, document selection and initial load.
mod actions;
/// `init`: construction of the `App` struct.
mod init;
/// `keyboard`: key bindings.
mod keyboard;
/// `menu`: menu rows, the menu cursor and the active entry.
mod menu;
/// `overlays`: the language picker.
mod overlays;
/// `preferences`: the theme toggle.
mod preferences;
/// `state`: the `App` struct and its sub-states.
mod state;
/// `tick`: applies finished background loads.
mod tick;

pub use state::{App, ContentView, MenuState};

pub(crate) use state::LoadEvent;
