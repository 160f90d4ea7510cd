//! Headless commands: print the menu tree or render one document without
//! starting the terminal viewer.

use anyhow::{anyhow, Context, Result};
use log::info;

use crate::config::{ConfigLoader, LanguageDescriptor};
use crate::content::{ContentRenderer, MarkdownRenderer};
use crate::detail;
use crate::menu::{MenuTree, INDENT_PER_LEVEL};

/// Picks the language named `code`, or the first declared one.
pub async fn resolve_language(loader: &ConfigLoader, code: Option<&str>) -> Result<LanguageDescriptor> {
    let languages = loader.load_languages().await?;
    let language = match code {
        Some(code) => languages.into_iter().find(|lang| lang.code == code),
        None => languages.into_iter().next(),
    };
    language.ok_or_else(|| match code {
        Some(code) => anyhow!("language {code} is not declared"),
        None => anyhow!("no languages configured"),
    })
}

/// The menu tree as indented text, or as JSON when `json` is set.
pub async fn tree_report(loader: &ConfigLoader, lang: Option<&str>, json: bool) -> Result<String> {
    let language = resolve_language(loader, lang).await?;
    let tree = MenuTree::build(loader.load_menu().await?).context("invalid menu")?;
    info!("Menu has {} entries", tree.len());

    if json {
        return serde_json::to_string_pretty(&tree.export()).context("failed to encode menu");
    }

    let mut out = String::new();
    for (id, depth) in tree.walk() {
        let entry = &tree.node(id).entry;
        let indent = " ".repeat(depth * INDENT_PER_LEVEL as usize);
        out.push_str(&format!("{indent}{} ({})\n", entry.title(&language.code), entry.file));
    }
    Ok(out)
}

/// Renders one document for `lang`. Defaults to the first declared document.
///
/// HTML output carries the entry's styled detail as a trailing `<aside>`.
pub async fn render_report(
    loader: &ConfigLoader,
    lang: Option<&str>,
    file: Option<&str>,
    html: bool,
) -> Result<String> {
    let language = resolve_language(loader, lang).await?;
    let tree = MenuTree::build(loader.load_menu().await?).context("invalid menu")?;
    let file = match file {
        Some(file) => file.to_string(),
        None => tree
            .first_declared()
            .map(|entry| entry.file.clone())
            .ok_or_else(|| anyhow!("menu is empty"))?,
    };

    let body = loader
        .load_document(&language.path, &file)
        .await
        .with_context(|| format!("failed to load {file}"))?;
    let renderer = MarkdownRenderer::default();
    if !html {
        let text = renderer.render_text(&body);
        let lines: Vec<String> = text
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();
        return Ok(lines.join("\n") + "\n");
    }

    let mut out = renderer.render_html(&body);
    let detail = tree
        .find_by_file(&file)
        .and_then(|id| tree.node(id).entry.detail.as_deref())
        .filter(|detail| !detail.trim().is_empty());
    if let Some(detail) = detail {
        out.push_str(&format!("<aside>{}</aside>\n", detail::to_html(detail)));
    }
    Ok(out)
}
