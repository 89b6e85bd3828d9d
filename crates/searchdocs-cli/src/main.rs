//! searchdocs CLI - jump from a symbol name to its Sphinx documentation page.
//!
//! Prints the URL of the best match on stdout, or opens it with `--browser`.
//! Failures print a colored `error:` line on stderr and exit with the code of
//! their [`error::ErrorCategory`].

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use searchdocs_core::{Config, DocsLookup};
use tracing::debug;

mod cli;
mod error;
mod utils;

use cli::Cli;
use error::{CliError, ErrorCategory, exit_code_from_error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = utils::logging::initialize_logging(&cli) {
        report(&err);
        return ErrorCategory::Internal.as_exit_code();
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            report(&err.into());
            return ErrorCategory::Internal.as_exit_code();
        },
    };

    match runtime.block_on(execute(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load().map_err(CliError::from)?;
    cli.apply_to(&mut config);
    debug!(
        docs_url = %config.defaults.docs_url,
        threshold = config.defaults.threshold,
        cache_root = %config.paths.cache_root.display(),
        "effective configuration"
    );

    let lookup = DocsLookup::from_config(&config).map_err(CliError::from)?;
    let url = lookup
        .find_url(&config.defaults.docs_url, &cli.search_term)
        .await
        .map_err(CliError::from)?;

    if cli.browser {
        utils::browser::open(url.as_str())
            .with_context(|| format!("Failed to open {url} in a browser"))
            .map_err(CliError::internal)?;
    } else {
        println!("{url}");
    }
    Ok(())
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".red().bold());
}
