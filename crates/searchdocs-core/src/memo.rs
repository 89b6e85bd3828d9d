//! Per-partition memoization of resolved query results.
//!
//! Keys are the raw query strings exactly as the user typed them, so `"dict"`
//! and `"dict "` are separate entries even though they resolve to the same
//! URL. Entries live until the partition is purged by a fingerprint change.

use crate::Result;
use crate::storage::{RESULTS_FILE, write_atomic};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable `query -> url` map stored inside one cache partition.
#[derive(Debug)]
pub struct ResultCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ResultCache {
    /// Opens the results store of a partition.
    ///
    /// A missing store (or partition) opens empty. So does a store that no
    /// longer parses: its entries are dropped with a warning and the next
    /// [`put`](Self::put) rewrites the file.
    pub fn open(partition: &Path) -> Result<Self> {
        let path = partition.join(RESULTS_FILE);
        if !path.is_file() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let raw = fs::read_to_string(&path)?;
        let entries = serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "discarding unreadable search results");
            BTreeMap::new()
        });
        Ok(Self { path, entries })
    }

    /// Memoized URL for `query`, if any.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<&str> {
        self.entries.get(query).map(String::as_str)
    }

    /// Records `url` for `query` and writes the store back to disk.
    pub fn put(&mut self, query: &str, url: &str) -> Result<()> {
        self.entries.insert(query.to_string(), url.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, json.as_bytes())?;
        debug!(query, url, "memoized search result");
        Ok(())
    }

    /// Number of memoized queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_store_opens_empty() {
        let dir = TempDir::new().unwrap();
        let cache = ResultCache::open(&dir.path().join("no-partition")).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.get("dict"), None);
    }

    #[test]
    fn test_put_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let partition = dir.path().join("partition");

        let mut cache = ResultCache::open(&partition).unwrap();
        cache
            .put("dict", "https://docs.python.org/3/library/stdtypes.html#dict")
            .unwrap();

        let reopened = ResultCache::open(&partition).unwrap();
        assert_eq!(
            reopened.get("dict"),
            Some("https://docs.python.org/3/library/stdtypes.html#dict")
        );
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let dir = TempDir::new().unwrap();
        let mut cache = ResultCache::open(dir.path()).unwrap();
        cache.put("dict", "u1").unwrap();

        assert_eq!(cache.get("dict"), Some("u1"));
        assert_eq!(cache.get("dict "), None);
        assert_eq!(cache.get("Dict"), None);
    }

    #[test]
    fn test_truncated_store_opens_empty_and_is_repaired() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(RESULTS_FILE),
            "{\n  \"dict\": \"https://docs.python.org/3/libr",
        )
        .unwrap();

        let mut cache = ResultCache::open(dir.path()).unwrap();
        assert!(cache.is_empty());

        cache.put("list", "u2").unwrap();
        let reopened = ResultCache::open(dir.path()).unwrap();
        assert_eq!(reopened.get("list"), Some("u2"));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_put_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let mut cache = ResultCache::open(dir.path()).unwrap();
        cache.put("dict", "u1").unwrap();
        cache.put("list", "u2").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![RESULTS_FILE]);
    }
}
