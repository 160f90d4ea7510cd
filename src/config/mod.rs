//! Access to the documentation site: where it lives, how documents are
//! fetched, and the YAML configuration that describes it.

pub mod documents;
pub mod loader;
pub mod site;
pub mod source;

pub use documents::{LanguageDescriptor, MenuEntry, UiStrings, REQUIRED_UI_KEYS};
pub use loader::{document_path, ConfigError, ConfigLoader};
pub use site::SiteLocation;
pub use source::{ContentSource, DirSource, FetchError, HttpSource};

use std::path::PathBuf;
use std::sync::Arc;

/// Builds a source from a CLI location: an `http(s)://` URL or a directory.
pub fn source_from_location(location: &str, cache_bust: bool) -> Result<Arc<dyn ContentSource>, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let source = HttpSource::new(SiteLocation::parse(location)?);
        let source = if cache_bust {
            source
        } else {
            source.without_cache_bust()
        };
        Ok(Arc::new(source))
    } else {
        Ok(Arc::new(DirSource::new(PathBuf::from(location))))
    }
}
