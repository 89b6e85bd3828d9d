//! Fingerprinted on-disk cache for inventory blobs.
//!
//! Layout:
//!
//! ```text
//! <cache_root>/
//!   <urlsafe-base64(base url)>/     one partition per documentation URL
//!     <fingerprint>                 the current objects.inv, named by ETag
//!     .search-results.json          memoized query results (see `memo`)
//! ```
//!
//! A partition holds at most one blob. Callers replace a blob by purging the
//! whole partition first, which also drops the memoized results that were
//! computed from the stale inventory.

use crate::{Config, Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the memoized results store inside a partition.
pub const RESULTS_FILE: &str = ".search-results.json";

/// Cache root plus the partition/blob naming rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    root_dir: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `root_dir`. Nothing is created on disk until
    /// a blob or result is written.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Creates a store at the configured cache root.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.cache_root.clone())
    }

    /// Returns the cache root directory
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Partition directory for a URL.
    ///
    /// Pure: the same URL string always yields the same path, and distinct
    /// strings yield distinct paths. Nothing is touched on disk.
    #[must_use]
    pub fn partition_for(&self, url: &str) -> PathBuf {
        self.root_dir.join(partition_name(url))
    }

    /// Path a blob with the given (already sanitized) fingerprint lives at.
    #[must_use]
    pub fn blob_path(partition: &Path, fingerprint: &str) -> PathBuf {
        partition.join(fingerprint)
    }

    /// Returns the blob path if a file with that fingerprint is resident.
    #[must_use]
    pub fn find_blob(partition: &Path, fingerprint: &str) -> Option<PathBuf> {
        let path = Self::blob_path(partition, fingerprint);
        path.is_file().then_some(path)
    }

    /// Writes `bytes` as the blob named `fingerprint`, creating the partition
    /// and its parents if needed.
    pub fn write_blob(partition: &Path, fingerprint: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(partition)?;
        let path = Self::blob_path(partition, fingerprint);
        write_atomic(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote inventory blob");
        Ok(path)
    }

    /// Removes a partition and everything in it. A missing partition is fine.
    pub fn purge(partition: &Path) -> Result<()> {
        match fs::remove_dir_all(partition) {
            Ok(()) => {
                debug!(partition = %partition.display(), "purged cache partition");
                Ok(())
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Names of the inventory blobs resident in a partition, sorted.
    pub fn blob_files(partition: &Path) -> Result<Vec<String>> {
        let entries = match fs::read_dir(partition) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Io(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// URL-safe, unpadded base64 of the URL's UTF-8 bytes.
#[must_use]
pub fn partition_name(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(url.as_bytes())
}

/// Prefix of fingerprints derived by encoding an unsafe `ETag`.
const ENCODED_PREFIX: &str = "b64-";

/// Turns a raw `ETag` header value into a blob file name.
///
/// Distinct tags always give distinct names. A tag made only of
/// `[A-Za-z0-9._-]` is used as is; anything else (path separators, `..`, a
/// leading dot, or a tag that already looks encoded) becomes `b64-` plus the
/// URL-safe base64 of the tag. Returns `None` when nothing usable remains
/// (empty or `""` tags).
#[must_use]
pub fn fingerprint_from_etag(etag: &str) -> Option<String> {
    let tag = etag.trim();
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    let tag = tag.trim_matches('"');

    if tag.is_empty() {
        return None;
    }
    if is_plain_file_name(tag) {
        return Some(tag.to_string());
    }
    Some(format!("{ENCODED_PREFIX}{}", URL_SAFE_NO_PAD.encode(tag.as_bytes())))
}

fn is_plain_file_name(tag: &str) -> bool {
    tag.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && !tag.contains("..")
        // Dot-files are reserved for partition bookkeeping.
        && !tag.starts_with('.')
        && !tag.starts_with(ENCODED_PREFIX)
}

/// Writes `bytes` to `path` through a hidden sibling temp file and a rename,
/// so readers never observe a partially written file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        let msg = format!("invalid cache file path: {}", path.display());
        return Err(Error::Io(std::io::Error::other(msg)));
    };
    let tmp_path = path.with_file_name(format!(".{}.tmp", name.trim_start_matches('.')));
    fs::write(&tmp_path, bytes)?;

    // Atomically rename temp file to final path (handle Windows overwrite)
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}
