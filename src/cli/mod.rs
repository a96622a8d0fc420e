//! CLI module
//!
//! Command-line interface for running searches.
//!
//! # Commands
//!
//! - `run` - Stream one query as JSON lines
//! - `batch` - Run several queries, one JSON array per query
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{AuthArgs, Cli, Commands, OutputFormat};
pub use runner::Runner;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Build the log filter from `RUST_LOG`-style directives.
///
/// Without directives the level is `info`. `verbose` raises the default
/// level to `debug`; target directives in `env` still apply.
pub fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    let filter = builder.parse_lossy(env.unwrap_or_default());

    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}
