use std::sync::Arc;

use log::{debug, info};
use serde::de::DeserializeOwned;

use super::{ContentSource, FetchError, LanguageDescriptor, MenuEntry, UiStrings};

pub const MENU_DOCUMENT: &str = "docs.yaml";
pub const LANGUAGES_DOCUMENT: &str = "languages.yaml";
pub const UI_DOCUMENT: &str = "ui.yaml";

/// Failure to load one of the structured configuration documents.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to fetch {document}: {source}")]
    Fetch {
        document: &'static str,
        #[source]
        source: FetchError,
    },
    #[error("failed to parse {document}: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{document} is missing the `ui.{key}` table")]
    MissingUiKey {
        document: &'static str,
        key: &'static str,
    },
}

/// Fetches and parses the site's YAML configuration documents.
#[derive(Clone)]
pub struct ConfigLoader {
    source: Arc<dyn ContentSource>,
}

impl ConfigLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    pub async fn load_menu(&self) -> Result<Vec<MenuEntry>, ConfigError> {
        let entries: Vec<MenuEntry> = self.load_yaml(MENU_DOCUMENT).await?;
        info!("Loaded {} menu entries", entries.len());
        Ok(entries)
    }

    pub async fn load_languages(&self) -> Result<Vec<LanguageDescriptor>, ConfigError> {
        let languages: Vec<LanguageDescriptor> = self.load_yaml(LANGUAGES_DOCUMENT).await?;
        info!("Loaded {} languages", languages.len());
        Ok(languages)
    }

    pub async fn load_ui(&self) -> Result<UiStrings, ConfigError> {
        let strings: UiStrings = self.load_yaml(UI_DOCUMENT).await?;
        if let Some(key) = strings.missing_key() {
            return Err(ConfigError::MissingUiKey {
                document: UI_DOCUMENT,
                key,
            });
        }
        Ok(strings)
    }

    /// Fetches one document body, `content_path/file`.
    pub async fn load_document(&self, content_path: &str, file: &str) -> Result<String, FetchError> {
        let relative = document_path(content_path, file);
        debug!("Fetching document {relative}");
        self.source.fetch_text(&relative).await
    }

    async fn load_yaml<T: DeserializeOwned>(&self, document: &'static str) -> Result<T, ConfigError> {
        let raw = self
            .source
            .fetch_text(document)
            .await
            .map_err(|source| ConfigError::Fetch { document, source })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse { document, source })
    }
}

/// Joins a language content path and a menu file without doubling slashes.
pub fn document_path(content_path: &str, file: &str) -> String {
    let dir = content_path.trim_end_matches('/');
    let file = file.trim_start_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}
