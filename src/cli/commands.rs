//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tweet search CLI
#[derive(Parser, Debug)]
#[command(name = "tweet-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Search configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub auth: AuthArgs,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Session options
#[derive(Args, Debug, Default, Clone)]
pub struct AuthArgs {
    /// Bearer token of the web client
    #[arg(long, global = true)]
    pub bearer: Option<String>,

    /// Activate a guest token with the bearer token
    #[arg(long, global = true, conflicts_with = "auth_token")]
    pub guest: bool,

    /// Value of the `auth_token` session cookie
    #[arg(long, global = true, requires = "csrf_token")]
    pub auth_token: Option<String>,

    /// Value of the `ct0` session cookie
    #[arg(long, global = true, requires = "auth_token")]
    pub csrf_token: Option<String>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream the results of one query, one record per line
    Run {
        /// Search query, operators included
        query: String,

        /// Stop after this many distinct tweets (0 = no limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run several queries and print one result list per query
    Batch {
        /// Search queries
        #[arg(required = true)]
        queries: Vec<String>,

        /// Stop each query after this many distinct tweets (0 = no limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Queries paginated at once
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Print the effective configuration as YAML
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Indented JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["tweet-search", "run", "(from:nasa)", "--limit", "50"])
            .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.verbose);
        match cli.command {
            Commands::Run { query, limit } => {
                assert_eq!(query, "(from:nasa)");
                assert_eq!(limit, Some(50));
            }
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_batch_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tweet-search",
            "batch",
            "foo",
            "bar",
            "--concurrency",
            "2",
            "--bearer",
            "abc",
            "--guest",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.auth.bearer.as_deref(), Some("abc"));
        assert!(cli.auth.guest);
        match cli.command {
            Commands::Batch {
                queries,
                limit,
                concurrency,
            } => {
                assert_eq!(queries, vec!["foo", "bar"]);
                assert_eq!(limit, None);
                assert_eq!(concurrency, Some(2));
            }
            other => panic!("Expected Batch, got {other:?}"),
        }
    }

    #[test]
    fn test_batch_requires_a_query() {
        assert!(Cli::try_parse_from(["tweet-search", "batch"]).is_err());
    }

    #[test]
    fn test_session_flags_come_in_pairs() {
        assert!(Cli::try_parse_from(["tweet-search", "run", "q", "--auth-token", "t"]).is_err());
        assert!(Cli::try_parse_from([
            "tweet-search",
            "run",
            "q",
            "--auth-token",
            "t",
            "--csrf-token",
            "c"
        ])
        .is_ok());
    }

    #[test]
    fn test_guest_conflicts_with_session() {
        let result = Cli::try_parse_from([
            "tweet-search",
            "run",
            "q",
            "--guest",
            "--auth-token",
            "t",
            "--csrf-token",
            "c",
        ]);
        assert!(result.is_err());
    }
}
