use reqwest::Url;

use super::FetchError;

/// Where the documentation site is hosted, and the prefix every fetch uses.
///
/// On a path-prefixed static host (`<user>.github.io/<repo>/`) the repository
/// segment becomes the prefix; anywhere else documents are fetched from the
/// host root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLocation {
    origin: Url,
    prefix: Option<String>,
}

const PREFIXED_HOST_SUFFIX: &str = "github.io";

impl SiteLocation {
    pub fn parse(location: &str) -> Result<Self, FetchError> {
        let url = Url::parse(location).map_err(|err| FetchError::InvalidLocation {
            location: location.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::from_url(&url))
    }

    pub fn from_url(url: &Url) -> Self {
        let prefix = url
            .host_str()
            .filter(|host| host.ends_with(PREFIXED_HOST_SUFFIX))
            .and_then(|_| url.path_segments())
            .and_then(|mut segments| segments.next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);

        let mut origin = url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        Self { origin, prefix }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Absolute URL of `relative`, without any cache-defeating query.
    pub fn resolve(&self, relative: &str) -> Result<Url, FetchError> {
        let relative = relative.trim_start_matches('/');
        let path = match &self.prefix {
            Some(prefix) => format!("/{prefix}/{relative}"),
            None => format!("/{relative}"),
        };
        self.origin
            .join(&path)
            .map_err(|err| FetchError::InvalidLocation {
                location: path,
                reason: err.to_string(),
            })
    }
}
