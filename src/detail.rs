//! Inline styling for menu entry details.
//!
//! A directive has the shape `@[prefix#color;style;style[text]]`. Every part
//! but the text is optional; the prefix is consumed and not shown. Known
//! styles are `bold`, `italic` and `underline`, and the colour is a 3 to 6
//! digit hex value.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\[([^#;]*)?(#[0-9a-fA-F]{3,6})?;?([^\]]*)\[([^\]]+)\]\]")
        .expect("directive pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl SpanStyle {
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && !self.bold && !self.italic && !self.underline
    }

    /// The inline CSS for this style, in colour, bold, italic, underline order.
    pub fn css(&self) -> String {
        let mut css = String::new();
        if let Some(color) = &self.color {
            css.push_str(&format!("color: {color};"));
        }
        if self.bold {
            css.push_str("font-weight: bold;");
        }
        if self.italic {
            css.push_str("font-style: italic;");
        }
        if self.underline {
            css.push_str("text-decoration: underline;");
        }
        css
    }

    /// The colour as RGB, expanding the three digit short form.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(self.color.as_deref()?)
    }
}

/// A run of text sharing one style. Line breaks are kept inside the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SpanStyle,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: SpanStyle::default(),
        }
    }
}

/// Splits `input` into styled segments. Text outside directives, and
/// directives carrying no recognised style, come out plain.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for captures in DIRECTIVE.captures_iter(input) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(Segment::plain(&input[cursor..whole.start()]));
        }
        segments.push(directive_segment(&captures));
        cursor = whole.end();
    }
    if cursor < input.len() {
        segments.push(Segment::plain(&input[cursor..]));
    }
    segments
}

fn directive_segment(captures: &Captures<'_>) -> Segment {
    let mut style = SpanStyle {
        color: captures.get(2).map(|color| color.as_str().to_string()),
        ..SpanStyle::default()
    };
    if let Some(styles) = captures.get(3) {
        for command in styles.as_str().split(';').map(str::trim) {
            match command {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                _ => {}
            }
        }
    }
    Segment {
        text: captures.get(4).map(|text| text.as_str()).unwrap_or_default().to_string(),
        style,
    }
}

/// Renders `input` as HTML: directives become styled `<span>`s and newlines
/// become `<br>`. Text is otherwise passed through untouched.
pub fn to_html(input: &str) -> String {
    let mut html = String::with_capacity(input.len());
    for segment in parse(input) {
        if segment.style.is_plain() {
            html.push_str(&segment.text);
        } else {
            html.push_str(&format!(
                "<span style=\"{}\">{}</span>",
                segment.style.css(),
                segment.text
            ));
        }
    }
    html.replace('\n', "<br>")
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match digits.len() {
        3 => {
            let mut doubled = digits.chars().map(|c| format!("{c}{c}"));
            Some((
                channel(&doubled.next()?)?,
                channel(&doubled.next()?)?,
                channel(&doubled.next()?)?,
            ))
        }
        6 => Some((
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_rendering_table() {
        let cases = [
            (
                "@[#ff0000;bold[Warning]]",
                r#"<span style="color: #ff0000;font-weight: bold;">Warning</span>"#,
            ),
            ("plain text\nline2", "plain text<br>line2"),
            (
                "@[;italic;underline[Note]]",
                r#"<span style="font-style: italic;text-decoration: underline;">Note</span>"#,
            ),
            (
                "Read @[tip#0af;underline[this]] first",
                r#"Read <span style="color: #0af;text-decoration: underline;">this</span> first"#,
            ),
            ("@[;unknown[Bare]]", "Bare"),
            ("@[#123456[Only colour]]", r#"<span style="color: #123456;">Only colour</span>"#),
            ("unterminated @[bold[x]", "unterminated @[bold[x]"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(to_html(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn styles_are_emitted_in_fixed_order() {
        assert_eq!(
            to_html("@[#abc;underline;bold;italic[x]]"),
            r#"<span style="color: #abc;font-weight: bold;font-style: italic;text-decoration: underline;">x</span>"#
        );
    }

    #[test]
    fn parse_keeps_surrounding_text_as_plain_segments() {
        let segments = parse("a @[;bold[b]] c");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::plain("a "));
        assert!(segments[1].style.bold);
        assert_eq!(segments[1].text, "b");
        assert_eq!(segments[2], Segment::plain(" c"));
    }

    #[test]
    fn hex_colours_expand_to_rgb() {
        let style = |color: &str| SpanStyle {
            color: Some(color.to_string()),
            ..SpanStyle::default()
        };
        assert_eq!(style("#ff8000").rgb(), Some((255, 128, 0)));
        assert_eq!(style("#0af").rgb(), Some((0, 170, 255)));
        assert_eq!(style("#abcd").rgb(), None);
    }
}
