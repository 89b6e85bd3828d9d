//! # CLI Structure and Argument Parsing
//!
//! `searchdocs` takes a single search term and prints the URL of the best
//! matching object in a Sphinx documentation set:
//!
//! ```bash
//! searchdocs dict
//! searchdocs difflib.get_clos_matches --browser
//! searchdocs --docs-url https://domdf-python-tools.readthedocs.io/en/latest/ StringList
//! ```
//!
//! Flags override the configuration file, which overrides built-in defaults.

use clap::Parser;
use searchdocs_core::Config;

/// Look up a symbol in Sphinx documentation and print its URL.
#[derive(Parser, Clone, Debug)]
#[command(name = "searchdocs", version, about, long_about = None)]
pub struct Cli {
    /// Name of the object to look up, e.g. `dict` or `typing.Dict`
    #[arg(value_name = "SEARCH_TERM")]
    pub search_term: String,

    /// Open the documentation page in a web browser instead of printing the URL
    #[arg(short, long)]
    pub browser: bool,

    /// Base URL of the documentation to search
    #[arg(long, env = "SEARCHDOCS_DOCS_URL", value_name = "URL")]
    pub docs_url: Option<String>,

    /// Minimum similarity score (0-100) a match needs
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (also honors `NO_COLOR`)
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = self.docs_url.as_deref().map(str::trim) {
            if !url.is_empty() {
                config.defaults.docs_url = url.to_string();
            }
        }
        if let Some(threshold) = self.threshold {
            config.defaults.threshold = threshold;
        }
    }
}
