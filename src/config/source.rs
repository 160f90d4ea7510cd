use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use super::SiteLocation;

/// Why a fetch from a [`ContentSource`] did not produce text.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The source answered, but not with success.
    #[error("{path}: server answered {status}")]
    Status { path: String, status: StatusCode },
    /// The request never completed.
    #[error("{path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The path is not present in a directory source.
    #[error("{path}: not found")]
    NotFound { path: String },
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },
}

impl FetchError {
    /// True when the source was reached and refused the document, as opposed
    /// to the request itself failing.
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. } | FetchError::NotFound { .. })
    }
}

/// Read access to the documentation content, keyed by site-relative path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human readable description, used in logs and the status line.
    fn describe(&self) -> String;

    /// Fetches the raw text at `relative`. Every call is one attempt.
    async fn fetch_text(&self, relative: &str) -> Result<String, FetchError>;
}

/// Fetches over HTTP from a static host.
pub struct HttpSource {
    site: SiteLocation,
    client: Client,
    cache_bust: bool,
}

impl HttpSource {
    pub fn new(site: SiteLocation) -> Self {
        Self {
            site,
            client: Client::new(),
            cache_bust: true,
        }
    }

    /// Disables the `?v=<millis>` query appended to every request.
    pub fn without_cache_bust(mut self) -> Self {
        self.cache_bust = false;
        self
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn describe(&self) -> String {
        match self.site.prefix() {
            Some(prefix) => format!("{} (prefix /{prefix})", self.site_root()),
            None => self.site_root(),
        }
    }

    async fn fetch_text(&self, relative: &str) -> Result<String, FetchError> {
        let mut url = self.site.resolve(relative)?;
        if self.cache_bust {
            url.query_pairs_mut()
                .append_pair("v", &cache_token().to_string());
        }
        debug!("GET {url}");

        let transport = |source| FetchError::Transport {
            path: relative.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: relative.to_string(),
                status,
            });
        }
        response.text().await.map_err(transport)
    }
}

impl HttpSource {
    fn site_root(&self) -> String {
        self.site
            .resolve("")
            .map(|url| url.to_string())
            .unwrap_or_else(|_| String::from("<invalid site>"))
    }
}

/// Milliseconds since the epoch, used to defeat intermediate caches.
fn cache_token() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

/// Reads documents from a local directory laid out like the static site.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `relative` under the root, refusing paths that climb out of it.
    fn resolve(&self, relative: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(relative.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FetchError::InvalidLocation {
                location: relative.display().to_string(),
                reason: String::from("path leaves the content root"),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch_text(&self, relative: &str) -> Result<String, FetchError> {
        let path = self.resolve(relative)?;
        debug!("read {}", path.display());
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound {
                path: relative.to_string(),
            }),
            Err(source) => Err(FetchError::Io {
                path: relative.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dir_source_reads_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("md/en")).unwrap();
        std::fs::write(dir.path().join("md/en/intro.md"), "# Intro").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.fetch_text("md/en/intro.md").await.unwrap(), "# Intro");
        assert_eq!(source.fetch_text("/md/en/intro.md").await.unwrap(), "# Intro");
    }

    #[tokio::test]
    async fn dir_source_reports_missing_file_as_status_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        let err = source.fetch_text("md/en/missing.md").await.unwrap_err();
        assert!(err.is_status());
    }

    #[tokio::test]
    async fn dir_source_refuses_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        let err = source.fetch_text("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidLocation { .. }));
    }
}
