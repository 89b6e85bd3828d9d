//! Symbol lookup: resolve, consult memo, fetch, decode, match, memoize.

use crate::fetcher::InventoryFetcher;
use crate::matcher::{self, MatchOptions, Suggestion};
use crate::memo::ResultCache;
use crate::storage::CacheStore;
use crate::url_resolver::UrlResolver;
use crate::{Config, Error, HttpTransport, Inventory, Result, Transport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Resolves symbol names to documentation URLs for any Sphinx site.
///
/// ```no_run
/// use searchdocs_core::{Config, DocsLookup};
///
/// # async fn example() -> searchdocs_core::Result<()> {
/// let lookup = DocsLookup::from_config(&Config::load()?)?;
/// let url = lookup.find_url("https://docs.python.org/3/", "dict").await?;
/// assert!(url.as_str().ends_with("stdtypes.html#dict"));
/// # Ok(())
/// # }
/// ```
pub struct DocsLookup {
    transport: Arc<dyn Transport>,
    resolver: UrlResolver,
    store: CacheStore,
    options: MatchOptions,
}

impl DocsLookup {
    /// Builds a lookup over an explicit transport and cache store.
    pub fn new(transport: Arc<dyn Transport>, store: CacheStore, options: MatchOptions) -> Self {
        Self {
            transport,
            resolver: UrlResolver::new(),
            store,
            options,
        }
    }

    /// Builds a lookup with an HTTP transport, cache root and match options
    /// taken from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.http)?;
        let options = MatchOptions {
            threshold: config.defaults.threshold,
            normalize: config.defaults.normalize,
        };
        Ok(Self::new(
            Arc::new(transport),
            CacheStore::from_config(config),
            options,
        ))
    }

    /// Match options applied by [`find_url`](Self::find_url).
    pub const fn options(&self) -> MatchOptions {
        self.options
    }

    /// Cache store backing this lookup.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Canonical base URL after redirects.
    pub async fn resolve(&self, base_url: &str) -> Result<Url> {
        self.resolver.resolve(self.transport.as_ref(), base_url).await
    }

    /// Path of the current cached inventory for `base_url`.
    pub async fn fetch_inventory(&self, base_url: &str) -> Result<PathBuf> {
        let canonical = self.resolve(base_url).await?;
        self.fetch_resolved(&canonical).await
    }

    /// Current inventory for `base_url`, fetched if necessary and decoded.
    pub async fn inventory(&self, base_url: &str) -> Result<Inventory> {
        let path = self.fetch_inventory(base_url).await?;
        Inventory::decode(&path)
    }

    /// Best candidate for `query` without memoization.
    pub async fn suggest(&self, base_url: &str, query: &str) -> Result<Option<Suggestion>> {
        let inventory = self.inventory(base_url).await?;
        Ok(matcher::suggest(&inventory, query, self.options))
    }

    /// Absolute documentation URL for `query` under `base_url`.
    ///
    /// Memoized answers are returned without touching the inventory. The
    /// memo key is the query exactly as given.
    pub async fn find_url(&self, base_url: &str, query: &str) -> Result<Url> {
        let canonical = self.resolve(base_url).await?;
        let partition = self.store.partition_for(canonical.as_str());

        if let Some(hit) = ResultCache::open(&partition)?.get(query) {
            debug!(query, url = hit, "memoized result");
            return Ok(Url::parse(hit)?);
        }

        let path = self.fetch_resolved(&canonical).await?;
        let inventory = Inventory::decode(&path)?;
        let Some(best) = matcher::suggest(&inventory, query, self.options) else {
            return Err(Error::NotFound(format!("Object {query} not found.")));
        };

        let object = inventory.get(best.index).ok_or_else(|| {
            Error::NotFound(format!("Object {query} not found."))
        })?;
        let url = canonical.join(&object.uri_expanded())?;
        info!(query, name = %best.name, score = best.score, %url, "matched object");

        // The fetch may have purged the partition, so reopen before writing.
        ResultCache::open(&partition)?.put(query, url.as_str())?;
        Ok(url)
    }

    async fn fetch_resolved(&self, canonical: &Url) -> Result<PathBuf> {
        InventoryFetcher::new(self.transport.as_ref(), &self.store)
            .fetch(canonical)
            .await
    }
}
