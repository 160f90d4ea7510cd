use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, ContentView, MenuState};
use crate::detail;
use crate::menu::{Emphasis, MenuRow};

pub mod theme;
use theme::{palette, Palette};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 12;

pub fn render(f: &mut Frame<'_>, app: &App) {
    let colors = palette(app.preferences.theme);
    let size = f.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let block = Paragraph::new(format!(
            "Terminal too small, resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().title("SwiftDocs").borders(Borders::ALL))
        .style(Style::default().fg(colors.fg_primary).bg(colors.bg_primary));
        f.render_widget(block, size);
        return;
    }

    f.render_widget(Block::default().style(Style::default().bg(colors.bg_primary)), size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(26),
            Constraint::Min(20),
            Constraint::Percentage(24),
        ])
        .split(vertical[1]);

    render_header(f, app, colors, vertical[0]);
    render_menu(f, app, colors, columns[0]);
    render_content(f, app, colors, columns[1]);
    render_detail(f, app, colors, columns[2]);
    render_status_bar(f, app, colors, vertical[2]);

    if let Some(selected) = app.language_picker {
        render_language_picker(f, app, colors, selected, size);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, colors: &Palette, area: Rect) {
    let lang = app.nav.language_code().unwrap_or_default();
    let label = |element: &'static str| -> String {
        app.ui_strings
            .as_ref()
            .and_then(|strings| strings.get(element, lang))
            .unwrap_or(element)
            .to_string()
    };
    let bar = Style::default().fg(colors.bar_text).bg(colors.bar_bg);
    let strong = Style::default()
        .fg(colors.bar_highlight_text)
        .bg(colors.bar_highlight_bg)
        .add_modifier(Modifier::BOLD);

    let language = app
        .nav
        .language_code()
        .map(|code| app.language_name(code))
        .unwrap_or_else(|| String::from("…"));
    let spans = vec![
        Span::styled(format!(" {} ", label("documentation")), strong),
        Span::styled(format!("  {}  ", label("home")), bar),
        Span::styled(format!("  {}  ", label("examples")), bar),
        Span::styled(format!("  [{language} ▾]"), bar),
        Span::styled(format!("  [{}]", app.preferences.theme.label()), bar),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
}

fn render_menu(f: &mut Frame<'_>, app: &App, colors: &Palette, area: Rect) {
    let block = panel_block(colors, "Menu", true);
    let inner_width = area.width.saturating_sub(2) as usize;

    let rows = match &app.menu {
        MenuState::Loading => {
            f.render_widget(placeholder("Loading…", colors.fg_dim).block(block), area);
            return;
        }
        MenuState::Failed(message) => {
            f.render_widget(placeholder(message, colors.error).block(block), area);
            return;
        }
        MenuState::Ready(_) => app.menu_rows(),
    };

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(menu_line(row, colors, inner_width)))
        .collect();
    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.menu_cursor.min(rows.len() - 1)));
    }
    let list = List::new(items)
        .block(block)
        .style(Style::default().bg(colors.bg_panel))
        .highlight_style(Style::default().bg(colors.cursor_bg))
        .highlight_symbol("›");
    f.render_stateful_widget(list, area, &mut state);
}

fn menu_line(row: &MenuRow, colors: &Palette, width: usize) -> Line<'static> {
    let mut style = match row.emphasis() {
        Emphasis::Strong => Style::default()
            .fg(colors.fg_primary)
            .add_modifier(Modifier::BOLD),
        Emphasis::Normal => Style::default().fg(colors.fg_primary),
        Emphasis::Dim => Style::default().fg(colors.fg_dim),
        Emphasis::Faint => Style::default()
            .fg(colors.fg_dim)
            .add_modifier(Modifier::DIM),
    };
    if row.active {
        style = style.fg(colors.active_fg).bg(colors.active_bg);
    }
    let indent = " ".repeat(row.indent() as usize);
    let title = truncate_to_width(&row.title, width.saturating_sub(indent.len() + 1));
    Line::from(Span::styled(format!("{indent}{title}"), style))
}

fn render_content(f: &mut Frame<'_>, app: &App, colors: &Palette, area: Rect) {
    let title = app.content.file().unwrap_or("Content").to_string();
    let block = panel_block(colors, &title, false);
    let paragraph = match &app.content {
        ContentView::Empty => placeholder("", colors.fg_dim),
        ContentView::Loading { file } => placeholder(&format!("Loading {file}…"), colors.fg_dim),
        ContentView::Rendered { text, .. } => Paragraph::new(text.clone())
            .style(Style::default().fg(colors.fg_primary))
            .wrap(Wrap { trim: false })
            .scroll((app.content_scroll, 0)),
        ContentView::Placeholder { message, .. } => placeholder(message, colors.error),
    };
    f.render_widget(paragraph.block(block), area);
}

fn render_detail(f: &mut Frame<'_>, app: &App, colors: &Palette, area: Rect) {
    let block = panel_block(colors, "Details", false);
    let paragraph = match app.active_detail() {
        Some(text) => Paragraph::new(detail_lines(text, colors)).wrap(Wrap { trim: true }),
        None => placeholder("No information available", colors.fg_dim),
    };
    f.render_widget(paragraph.block(block), area);
}

/// Converts a styled detail string into terminal lines.
fn detail_lines(text: &str, colors: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for segment in detail::parse(text) {
        let mut style = Style::default().fg(colors.fg_primary);
        if let Some((r, g, b)) = segment.style.rgb() {
            style = style.fg(Color::Rgb(r, g, b));
        }
        if segment.style.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if segment.style.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if segment.style.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        for (index, piece) in segment.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(Line::default());
            }
            if !piece.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.spans.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines
}

fn render_status_bar(f: &mut Frame<'_>, app: &App, colors: &Palette, area: Rect) {
    let busy = if app.is_busy() { "⟳ " } else { "" };
    let hints = "↑↓ move  ⏎ open  l language  t theme  r reload  q quit";
    let left = format!(" {busy}{}", app.status_message);
    let gap = (area.width as usize)
        .saturating_sub(UnicodeWidthStr::width(left.as_str()) + UnicodeWidthStr::width(hints) + 1);
    let text = format!("{left}{}{hints} ", " ".repeat(gap));
    let bar = Paragraph::new(text).style(Style::default().fg(colors.bar_text).bg(colors.bar_bg));
    f.render_widget(bar, area);
}

fn render_language_picker(f: &mut Frame<'_>, app: &App, colors: &Palette, selected: usize, size: Rect) {
    let width = app
        .languages
        .iter()
        .map(|lang| UnicodeWidthStr::width(lang.name.as_str()) as u16)
        .max()
        .unwrap_or(0)
        .saturating_add(6)
        .max(20)
        .min(size.width);
    let height = (app.languages.len() as u16 + 2).min(size.height);
    let area = Rect {
        x: size.width.saturating_sub(width) / 2,
        y: size.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let items: Vec<ListItem> = app
        .languages
        .iter()
        .map(|lang| ListItem::new(format!("{} ({})", lang.name, lang.code)))
        .collect();
    let mut state = ListState::default();
    state.select(Some(selected));
    let list = List::new(items)
        .block(panel_block(colors, "Language", true))
        .style(Style::default().fg(colors.fg_primary).bg(colors.bg_panel))
        .highlight_style(
            Style::default()
                .fg(colors.bar_highlight_text)
                .bg(colors.bar_highlight_bg)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn panel_block<'a>(colors: &Palette, title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused {
        colors.border_focus
    } else {
        colors.border_idle
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, Style::default().fg(colors.fg_primary)))
        .style(Style::default().bg(colors.bg_panel))
}

fn placeholder<'a>(message: &str, color: Color) -> Paragraph<'a> {
    Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
}

/// Cuts `text` to at most `width` terminal cells, marking the cut with `…`.
fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_wide_characters() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("documentation", 6), "docum…");
        assert_eq!(truncate_to_width("文件文件文件", 5), "文件…");
    }

    #[test]
    fn detail_lines_split_on_newlines_and_keep_style() {
        let lines = detail_lines("@[#ff0000;bold[Warn]]\nsecond", &theme::DARK);
        assert_eq!(lines.len(), 2);
        let warn = &lines[0].spans[0];
        assert_eq!(warn.content, "Warn");
        assert_eq!(warn.style.fg, Some(Color::Rgb(255, 0, 0)));
        assert!(warn.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(lines[1].spans[0].content, "second");
    }
}
