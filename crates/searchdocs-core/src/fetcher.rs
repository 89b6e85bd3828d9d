//! Conditional download of `objects.inv` into the fingerprinted cache.
//!
//! When a partition already exists, a `HEAD` request is enough to learn the
//! remote `ETag`; the body is downloaded only when no blob with that
//! fingerprint is resident. A changed fingerprint purges the partition first,
//! so it never accumulates stale inventories.

use crate::storage::{CacheStore, fingerprint_from_etag};
use crate::{Result, Transport};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

/// File name of the inventory relative to a documentation base URL.
pub const INVENTORY_FILE: &str = "objects.inv";

/// Downloads inventories into a [`CacheStore`].
pub struct InventoryFetcher<'a> {
    transport: &'a dyn Transport,
    store: &'a CacheStore,
}

impl<'a> InventoryFetcher<'a> {
    /// Creates a fetcher over a transport and a cache store.
    pub fn new(transport: &'a dyn Transport, store: &'a CacheStore) -> Self {
        Self { transport, store }
    }

    /// Returns the path of the current inventory blob for an already
    /// canonical base URL, downloading it only if the remote fingerprint
    /// differs from the cached one.
    ///
    /// Request failures propagate; there is no fallback to a stale blob.
    pub async fn fetch(&self, base_url: &Url) -> Result<PathBuf> {
        let inventory_url = inventory_url(base_url)?;
        let partition = self.store.partition_for(base_url.as_str());

        if partition.exists() {
            let head = self.transport.head(&inventory_url).await?;
            match head.etag.as_deref().and_then(fingerprint_from_etag) {
                Some(fingerprint) => {
                    if let Some(path) = CacheStore::find_blob(&partition, &fingerprint) {
                        debug!(%inventory_url, %fingerprint, "cached inventory is current");
                        return Ok(path);
                    }
                    info!(%inventory_url, %fingerprint, "inventory changed, refreshing cache");
                },
                None => {
                    warn!(%inventory_url, "HEAD response has no ETag; refetching inventory");
                },
            }
            CacheStore::purge(&partition)?;
        }

        let response = self.transport.get(&inventory_url).await?;
        let fingerprint = response
            .etag
            .as_deref()
            .and_then(fingerprint_from_etag)
            .unwrap_or_else(|| {
                warn!(%inventory_url, "GET response has no ETag; using content fingerprint");
                content_fingerprint(&response.body)
            });

        let path = CacheStore::write_blob(&partition, &fingerprint, &response.body)?;
        info!(
            "Fetched {} bytes from {}",
            response.body.len(),
            inventory_url
        );
        Ok(path)
    }
}

/// `<base_url>objects.inv`.
pub fn inventory_url(base_url: &Url) -> Result<Url> {
    Ok(base_url.join(INVENTORY_FILE)?)
}

fn content_fingerprint(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    format!("sha256-{}", URL_SAFE_NO_PAD.encode(digest))
}
