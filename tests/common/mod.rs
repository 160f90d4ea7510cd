#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use swiftdocs::config::{ContentSource, FetchError};

pub const LANGUAGES: &str = "\
- code: en
  path: md/en
  name: English
- code: fr
  path: md/fr
  name: Français
";

pub const UI: &str = "\
ui:
  documentation:
    en: Documentation
    fr: Documentation
  home:
    en: Home
    fr: Accueil
  examples:
    en: Examples
    fr: Exemples
";

pub const MENU: &str = "\
- key: intro
  file: intro.md
  titles:
    en: Introduction
    fr: Introduction
  detail: \"@[#ff0000;bold[Start here]]\"
- key: basics
  file: basics.md
  branch: intro
  titles:
    en: Basics
    fr: Bases
- key: vars
  file: vars.md
  branch: basics
  titles:
    en: Variables
- key: advanced
  file: advanced.md
  titles:
    en: Advanced
    fr: Avancé
";

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// The host answered 404.
    Status,
    /// The request never completed.
    Network,
}

/// A content source backed by a map, with per-path failures and delays.
#[derive(Default)]
pub struct MemorySource {
    files: Mutex<HashMap<String, String>>,
    failures: Mutex<HashMap<String, Failure>>,
    delays: Mutex<HashMap<String, Duration>>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// A two-language site with a four-entry menu.
    pub fn site() -> Arc<Self> {
        let source = Self::default();
        source.insert("languages.yaml", LANGUAGES);
        source.insert("ui.yaml", UI);
        source.insert("docs.yaml", MENU);
        for lang in ["en", "fr"] {
            for file in ["intro.md", "basics.md", "vars.md", "advanced.md"] {
                source.insert(&format!("md/{lang}/{file}"), &format!("# {lang} {file}\n\nBody."));
            }
        }
        Arc::new(source)
    }

    pub fn insert(&self, path: &str, body: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), body.to_string());
    }

    pub fn fail(&self, path: &str, failure: Failure) {
        self.failures
            .lock()
            .unwrap()
            .insert(path.to_string(), failure);
    }

    pub fn delay(&self, path: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(path.to_string(), delay);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn describe(&self) -> String {
        String::from("memory")
    }

    async fn fetch_text(&self, relative: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(relative.to_string());
        let delay = self.delays.lock().unwrap().get(relative).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let path = relative.to_string();
        let failure = self.failures.lock().unwrap().get(relative).copied();
        match failure {
            Some(Failure::Status) => {
                return Err(FetchError::Status {
                    path,
                    status: StatusCode::NOT_FOUND,
                })
            }
            Some(Failure::Network) => {
                return Err(FetchError::Io {
                    path,
                    source: io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
                })
            }
            None => {}
        }

        self.files
            .lock()
            .unwrap()
            .get(relative)
            .cloned()
            .ok_or(FetchError::NotFound { path })
    }
}
