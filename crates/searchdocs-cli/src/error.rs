//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so that shell scripts can react to the kind of
//! failure without parsing messages.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | URL printed or browser opened |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, URL or configuration |
//! | 3 | `NotFound` | No object matched the search term |
//! | 5 | `Network` | Connection, HTTP status or protocol failure |
//! | 6 | `Timeout` | Request timed out |
//! | 7 | `Integrity` | Corrupt inventory or cache data |
//!
//! ```bash
//! searchdocs get_close_matches
//! case $? in
//!     0) echo "Found" ;;
//!     3) echo "No such object" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments, base URL or configuration (exit code 2).
    Usage = 2,

    /// No object met the match threshold (exit code 3).
    NotFound = 3,

    /// Network, HTTP status or protocol failure (exit code 5).
    Network = 5,

    /// Request timed out (exit code 6).
    Timeout = 6,

    /// Corrupt inventory or cache data (exit code 7).
    Integrity = 7,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Category of a core library error.
    #[must_use]
    pub fn from_core(err: &searchdocs_core::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        match err.category() {
            "not_found" => Self::NotFound,
            "transport" | "http_status" | "protocol" => Self::Network,
            "format" | "serialization" => Self::Integrity,
            "invalid_url" | "config" => Self::Usage,
            _ => Self::Internal,
        }
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` with an `ErrorCategory` to enable proper
/// exit codes while preserving full error context and chains.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl From<searchdocs_core::Error> for CliError {
    fn from(err: searchdocs_core::Error) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.source()
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// If the error is a `CliError`, returns its category's exit code.
/// Anything else was never categorized and counts as internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    ErrorCategory::Internal.exit_code()
}
