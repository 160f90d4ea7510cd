use std::fs;
use std::sync::Arc;

use swiftdocs::commands::{render_report, resolve_language, tree_report};
use swiftdocs::config::{ConfigLoader, DirSource};

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("languages.yaml"),
        "- code: en\n  path: md/en\n  name: English\n- code: de\n  path: md/de\n  name: Deutsch\n",
    )
    .unwrap();
    fs::write(
        root.join("docs.yaml"),
        "\
- key: intro
  file: intro.md
  titles: { en: Intro, de: Einführung }
  detail: \"@[;bold[Read first]]\"
- key: setup
  file: setup.md
  branch: intro
  titles: { en: Setup }
",
    )
    .unwrap();
    fs::create_dir_all(root.join("md/en")).unwrap();
    fs::create_dir_all(root.join("md/de")).unwrap();
    fs::write(root.join("md/en/intro.md"), "# Hello\n\nWelcome *here*.\n").unwrap();
    fs::write(root.join("md/de/intro.md"), "# Hallo\n").unwrap();
    fs::write(root.join("md/en/setup.md"), "- one\n- two\n").unwrap();
    dir
}

fn loader(dir: &tempfile::TempDir) -> ConfigLoader {
    ConfigLoader::new(Arc::new(DirSource::new(dir.path())))
}

#[tokio::test]
async fn tree_prints_indented_titles() {
    let dir = site();
    let out = tree_report(&loader(&dir), None, false).await.unwrap();
    assert_eq!(out, "Intro (intro.md)\n  Setup (setup.md)\n");

    let out = tree_report(&loader(&dir), Some("de"), false).await.unwrap();
    assert_eq!(out, "Einführung (intro.md)\n  setup.md (setup.md)\n");
}

#[tokio::test]
async fn tree_json_is_nested() {
    let dir = site();
    let out = tree_report(&loader(&dir), None, true).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["children"][0]["key"], "setup");
}

#[tokio::test]
async fn render_defaults_to_first_document() {
    let dir = site();
    let out = render_report(&loader(&dir), None, None, true).await.unwrap();
    assert!(out.contains("<h1>Hello</h1>"));
    assert!(out.contains("<em>here</em>"));
    assert!(out.contains("<aside><span style=\"font-weight: bold;\">Read first</span></aside>"));

    let out = render_report(&loader(&dir), Some("en"), Some("setup.md"), false)
        .await
        .unwrap();
    assert!(out.contains("one"));
    assert!(out.contains("two"));
}

#[tokio::test]
async fn render_reports_missing_documents() {
    let dir = site();
    let err = render_report(&loader(&dir), Some("de"), Some("setup.md"), false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("setup.md"));
}

#[tokio::test]
async fn unknown_language_is_an_error() {
    let dir = site();
    let err = resolve_language(&loader(&dir), Some("fr")).await.unwrap_err();
    assert!(err.to_string().contains("fr"));
}
