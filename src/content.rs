//! Markdown rendering for the content pane and the `render` command.

use pulldown_cmark::{html, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::config::FetchError;

/// Shown when the source answered without success.
pub const FAILED_TO_LOAD: &str = "Failed to load file.";
/// Shown when the request itself failed.
pub const ERROR_LOADING: &str = "Error loading page.";

/// The placeholder that replaces a document that could not be fetched.
pub fn placeholder_for(error: &FetchError) -> &'static str {
    if error.is_status() {
        FAILED_TO_LOAD
    } else {
        ERROR_LOADING
    }
}

/// Turns a raw document body into something displayable.
pub trait ContentRenderer: Send + Sync {
    fn render_text(&self, source: &str) -> Text<'static>;
    fn render_html(&self, source: &str) -> String;
}

/// Colours used for Markdown elements in the terminal.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownStyles {
    pub heading: Style,
    pub code: Style,
    pub link: Style,
    pub quote: Style,
    pub rule: Style,
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self {
            heading: Style::default().add_modifier(Modifier::BOLD),
            code: Style::default().add_modifier(Modifier::DIM),
            link: Style::default().add_modifier(Modifier::UNDERLINED),
            quote: Style::default().add_modifier(Modifier::ITALIC),
            rule: Style::default().add_modifier(Modifier::DIM),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    styles: MarkdownStyles,
}

impl MarkdownRenderer {
    pub fn new(styles: MarkdownStyles) -> Self {
        Self { styles }
    }

    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn render_text(&self, source: &str) -> Text<'static> {
        let mut writer = TextWriter::new(self.styles);
        for event in Parser::new_ext(source, Self::options()) {
            writer.event(event);
        }
        writer.finish()
    }

    fn render_html(&self, source: &str) -> String {
        let mut output = String::new();
        html::push_html(&mut output, Parser::new_ext(source, Self::options()));
        output
    }
}

/// Accumulates pulldown-cmark events into terminal lines.
struct TextWriter {
    styles: MarkdownStyles,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    modifiers: Vec<Style>,
    /// Next number for each open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    link_target: Option<String>,
}

impl TextWriter {
    fn new(styles: MarkdownStyles) -> Self {
        Self {
            styles,
            lines: Vec::new(),
            current: Vec::new(),
            modifiers: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
            link_target: None,
        }
    }

    fn style(&self) -> Style {
        self.modifiers
            .iter()
            .fold(Style::default(), |acc, style| acc.patch(*style))
    }

    fn push_text(&mut self, text: &str) {
        if self.current.is_empty() && self.quote_depth > 0 {
            self.current
                .push(Span::styled("│ ".repeat(self.quote_depth), self.styles.quote));
        }
        self.current.push(Span::styled(text.to_string(), self.style()));
    }

    fn flush_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn flush_if_pending(&mut self) {
        if !self.current.is_empty() {
            self.flush_line();
        }
    }

    fn blank_line(&mut self) {
        self.flush_if_pending();
        if self.lines.last().is_some_and(|line| !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                for line in text.lines() {
                    self.current
                        .push(Span::styled(format!("    {line}"), self.styles.code));
                    self.flush_line();
                }
            }
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                self.current
                    .push(Span::styled(format!("`{code}`"), self.styles.code));
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.blank_line();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(40), self.styles.rule)));
                self.lines.push(Line::default());
            }
            Event::TaskListMarker(done) => self.push_text(if done { "[x] " } else { "[ ] " }),
            Event::Html(raw) | Event::InlineHtml(raw) => self.push_text(&raw),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank_line();
                let marker = "#".repeat(heading_rank(level));
                self.modifiers.push(self.styles.heading);
                self.push_text(&format!("{marker} "));
            }
            Tag::Paragraph if self.lists.is_empty() => self.flush_if_pending(),
            Tag::BlockQuote { .. } => {
                self.blank_line();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.blank_line();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    self.lines
                        .push(Line::from(Span::styled(format!("  [{lang}]"), self.styles.rule)));
                }
            }
            Tag::List(start) => {
                self.flush_if_pending();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_if_pending();
                let depth = self.lists.len().saturating_sub(1);
                let bullet = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let label = format!("{number}. ");
                        *number += 1;
                        label
                    }
                    _ => String::from("• "),
                };
                self.push_text(&format!("{}{bullet}", "  ".repeat(depth)));
            }
            Tag::Emphasis => self.modifiers.push(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.modifiers.push(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self
                .modifiers
                .push(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { dest_url, .. } => {
                self.link_target = Some(dest_url.to_string());
                self.modifiers.push(self.styles.link);
            }
            Tag::TableRow | Tag::TableHead => self.flush_if_pending(),
            Tag::TableCell => self.push_text("│ "),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading { .. } => {
                self.modifiers.pop();
                self.flush_line();
                self.lines.push(Line::default());
            }
            TagEnd::Paragraph => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::BlockQuote { .. } => {
                self.flush_if_pending();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.lines.push(Line::default());
            }
            TagEnd::List { .. } => {
                self.flush_if_pending();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::Item => self.flush_if_pending(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.modifiers.pop();
            }
            TagEnd::Link => {
                self.modifiers.pop();
                if let Some(target) = self.link_target.take() {
                    self.current
                        .push(Span::styled(format!(" <{target}>"), self.styles.rule));
                }
            }
            TagEnd::TableCell => self.push_text(" "),
            TagEnd::TableRow | TagEnd::TableHead => self.flush_line(),
            TagEnd::Table => self.lines.push(Line::default()),
            _ => {}
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_if_pending();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}

fn heading_rank(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
