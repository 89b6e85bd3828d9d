//! # searchdocs-core
//!
//! Core functionality for searchdocs - resolve a symbol name to its page in
//! any Sphinx-built documentation set.
//!
//! Sphinx publishes an `objects.inv` inventory next to every documentation
//! build, listing each documented object with its relative URI. This crate
//! downloads that inventory, caches it on disk keyed by the server's `ETag`,
//! fuzzy-matches a query against the object names and memoizes the answer.
//!
//! ## Architecture
//!
//! - **URL resolution**: follow redirects to the canonical base URL
//! - **Storage**: one cache partition per base URL, holding one inventory blob
//! - **Fetching**: `HEAD` to revalidate, `GET` only when the fingerprint changed
//! - **Inventory**: decoder for the Sphinx v2 inventory format
//! - **Matching**: deterministic similarity ranking with an inclusive threshold
//! - **Memo**: per-partition store of resolved query URLs
//!
//! ## Quick Start
//!
//! ```no_run
//! use searchdocs_core::{Config, DocsLookup, Result};
//!
//! # async fn run() -> Result<()> {
//! let lookup = DocsLookup::from_config(&Config::load()?)?;
//! let url = lookup.find_url("https://docs.python.org/", "difflib.get_clos_matches").await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`] with structured error information:
//!
//! ```no_run
//! use searchdocs_core::{DocsLookup, Error};
//!
//! # async fn run(lookup: DocsLookup) {
//! match lookup.find_url("https://docs.python.org/3/", "dict").await {
//!     Ok(url) => println!("{url}"),
//!     Err(Error::NotFound(msg)) => eprintln!("{msg}"),
//!     Err(e) if e.is_recoverable() => eprintln!("Recoverable error: {e}"),
//!     Err(e) => eprintln!("Fatal error: {e}"),
//! }
//! # }
//! ```

/// Configuration file and environment overrides
pub mod config;
/// Error types and result aliases
pub mod error;
/// Conditional inventory download
pub mod fetcher;
/// Sphinx inventory decoding
pub mod inventory;
/// End-to-end symbol lookup
pub mod lookup;
/// Fuzzy name matching
pub mod matcher;
/// Memoized query results
pub mod memo;
/// Fingerprinted on-disk cache
pub mod storage;
/// HTTP transport abstraction
pub mod transport;
/// Base URL canonicalization
pub mod url_resolver;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{Config, DefaultsConfig, HttpConfig, PathsConfig};
pub use error::{Error, Result};
pub use fetcher::InventoryFetcher;
pub use inventory::{DocumentedObject, Inventory};
pub use lookup::DocsLookup;
pub use matcher::{MatchOptions, Suggestion, rank, ratio, suggest};
pub use memo::ResultCache;
pub use storage::CacheStore;
pub use transport::{HttpTransport, Response, Transport};
pub use url_resolver::UrlResolver;
