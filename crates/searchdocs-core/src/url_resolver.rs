//! Canonicalization of documentation base URLs.
//!
//! Documentation hosts commonly redirect their bare domain to a versioned
//! path (`https://docs.python.org/` -> `https://docs.python.org/3/`). The
//! cache partition and every joined object URI are derived from the URL the
//! redirects end at, so it is resolved once, up front, with a `HEAD` request.

use crate::{Error, Result, Transport};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;
use url::Url;

/// Follows redirects for base URLs, remembering each answer for the lifetime
/// of the resolver.
#[derive(Debug, Default)]
pub struct UrlResolver {
    resolved: Mutex<HashMap<String, Url>>,
}

impl UrlResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical form of `url`: the final URL after redirects, with a
    /// directory-style trailing slash.
    ///
    /// Only the first call for a given input string touches the network.
    pub async fn resolve(&self, transport: &dyn Transport, url: &str) -> Result<Url> {
        if let Some(hit) = self.cached(url) {
            debug!(%url, resolved = %hit, "base url already resolved");
            return Ok(hit);
        }

        let parsed = parse_base_url(url)?;
        let response = transport.head(&parsed).await?;
        let canonical = as_directory(response.url);

        if canonical.as_str() != url {
            debug!(%url, resolved = %canonical, "resolved base url");
        }

        if let Ok(mut resolved) = self.resolved.lock() {
            resolved.insert(url.to_string(), canonical.clone());
        }
        Ok(canonical)
    }

    fn cached(&self, url: &str) -> Option<Url> {
        self.resolved
            .lock()
            .ok()
            .and_then(|resolved| resolved.get(url).cloned())
    }
}

/// Parses an absolute `http`/`https` URL.
pub fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("'{url}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::InvalidUrl(format!(
            "'{url}': unsupported scheme '{scheme}'"
        ))),
    }
}

/// Ensures the path ends in `/` so relative object URIs join beneath it.
#[must_use]
pub fn as_directory(mut url: Url) -> Url {
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
