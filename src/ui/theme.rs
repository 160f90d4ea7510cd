use ratatui::style::Color;

use crate::preferences::Theme;

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_panel: Color,
    pub fg_primary: Color,
    pub fg_dim: Color,
    pub bar_bg: Color,
    pub bar_text: Color,
    pub bar_highlight_bg: Color,
    pub bar_highlight_text: Color,
    pub border_idle: Color,
    pub border_focus: Color,
    pub active_bg: Color,
    pub active_fg: Color,
    pub cursor_bg: Color,
    pub error: Color,
}

pub const DARK: Palette = Palette {
    bg_primary: Color::Rgb(0, 0, 0),
    bg_panel: Color::Rgb(12, 12, 12),
    fg_primary: Color::Rgb(190, 190, 190),
    fg_dim: Color::Rgb(128, 128, 128),
    bar_bg: Color::Rgb(23, 52, 127),
    bar_text: Color::Rgb(235, 240, 255),
    bar_highlight_bg: Color::Rgb(73, 102, 177),
    bar_highlight_text: Color::Rgb(255, 255, 255),
    border_idle: Color::Rgb(61, 120, 120),
    border_focus: Color::Rgb(187, 94, 0),
    active_bg: Color::Rgb(120, 160, 255),
    active_fg: Color::Rgb(255, 255, 255),
    cursor_bg: Color::Rgb(60, 60, 60),
    error: Color::Rgb(230, 90, 90),
};

pub const LIGHT: Palette = Palette {
    bg_primary: Color::Rgb(250, 250, 250),
    bg_panel: Color::Rgb(240, 240, 240),
    fg_primary: Color::Rgb(30, 30, 30),
    fg_dim: Color::Rgb(110, 110, 110),
    bar_bg: Color::Rgb(208, 220, 250),
    bar_text: Color::Rgb(20, 30, 60),
    bar_highlight_bg: Color::Rgb(150, 175, 235),
    bar_highlight_text: Color::Rgb(0, 0, 0),
    border_idle: Color::Rgb(150, 170, 170),
    border_focus: Color::Rgb(200, 110, 20),
    active_bg: Color::Rgb(0, 90, 181),
    active_fg: Color::Rgb(255, 255, 255),
    cursor_bg: Color::Rgb(215, 215, 215),
    error: Color::Rgb(180, 30, 30),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}
