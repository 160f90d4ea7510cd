//! SwiftDocs: a terminal documentation viewer.
//!
//! Documents are described by a YAML menu (`docs.yaml`), a language list
//! (`languages.yaml`) and a UI string table (`ui.yaml`), fetched from a
//! directory or a static web host. The library exposes the menu hierarchy
//! builder, the navigation state machine and the controller that wires them
//! to a [`config::ContentSource`]; the binary adds the ratatui front end.

pub mod app;
pub mod commands;
pub mod config;
pub mod content;
pub mod detail;
pub mod event;
pub mod logging;
pub mod menu;
pub mod navigation;
pub mod preferences;
pub mod tui;
pub mod ui;
