//! Error types and handling for searchdocs-core operations.
//!
//! Every failure in the lookup pipeline is represented by a single [`Error`]
//! enum. Nothing in the core retries or falls back to stale data: errors
//! propagate unchanged to the caller of
//! [`DocsLookup::find_url`](crate::DocsLookup::find_url).
//!
//! ## Error Categories
//!
//! - **Transport**: connection, DNS, timeout and body-read failures
//! - **HTTP status**: the server answered with a non-success status
//! - **Protocol**: a response header the protocol depends on is unusable
//! - **Format**: the inventory header or compressed body is malformed
//! - **Not found**: no inventory entry met the similarity threshold
//! - **I/O / Config / Serialization**: local cache and configuration failures
//!
//! ```rust
//! use searchdocs_core::Error;
//!
//! let err = Error::NotFound("Object frobnicate not found.".to_string());
//! assert_eq!(err.category(), "not_found");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for searchdocs-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The network request itself failed.
    ///
    /// Covers refused connections, DNS failures, timeouts and interrupted
    /// response bodies. The underlying `reqwest::Error` is preserved.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status that is neither success nor a
    /// followed redirect.
    #[error("HTTP status {status} for {url}")]
    HttpStatus {
        /// URL that produced the status (after redirects).
        url: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// A response did not carry a header in the expected shape.
    ///
    /// Raised when an `ETag` header is present but cannot be decoded as a
    /// visible ASCII string.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The inventory blob could not be decoded.
    ///
    /// ## Common Causes
    ///
    /// - Missing or unsupported `# Sphinx inventory version` header
    /// - Truncated or corrupt zlib stream
    /// - Decompressed body is not UTF-8
    #[error("Format error: {0}")]
    Format(String),

    /// No inventory entry scored at or above the match threshold.
    #[error("{0}")]
    NotFound(String),

    /// A URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Cache filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or its location cannot be determined.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted data (memoized results) could not be read or written.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might succeed when the caller retries later.
    ///
    /// The core never retries on its own; this is a hint for callers that
    /// want to implement their own policy.
    ///
    /// ```rust
    /// use searchdocs_core::Error;
    ///
    /// let busy = Error::HttpStatus { url: "https://example.com/".into(), status: 503 };
    /// assert!(busy.is_recoverable());
    ///
    /// let gone = Error::HttpStatus { url: "https://example.com/".into(), status: 404 };
    /// assert!(!gone.is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Whether the underlying failure was a request timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    /// Get the error category as a static string identifier.
    ///
    /// Used for structured logging and by the CLI to pick an exit code.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Protocol(_) => "protocol",
            Self::Format(_) => "format",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
