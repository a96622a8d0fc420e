//! CLI runner - executes commands

use crate::auth::AuthConfig;
use crate::cli::commands::{AuthArgs, Cli, Commands, OutputFormat};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::search::Search;
use futures::TryStreamExt;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Run { query, limit } => self.search_one(out, query, *limit).await,
            Commands::Batch {
                queries,
                limit,
                concurrency,
            } => self.search_batch(out, queries, *limit, *concurrency).await,
            Commands::Config => {
                let yaml = serde_yaml::to_string(&self.load_config()?)?;
                out.write_all(yaml.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Load the config file, or defaults when none is given
    fn load_config(&self) -> Result<SearchConfig> {
        match &self.cli.config {
            Some(path) => SearchConfig::from_file(path),
            None => Ok(SearchConfig::default()),
        }
    }

    async fn search_one<W: Write>(
        &self,
        out: &mut W,
        query: &str,
        limit: Option<usize>,
    ) -> Result<()> {
        let search = Search::new(self.load_config()?, build_auth_config(&self.cli.auth)?)?;
        let start = Instant::now();
        let mut count = 0usize;

        let mut records = search.run(query, limit);
        while let Some(record) = records.try_next().await? {
            self.output(out, &record)?;
            count += 1;
        }

        info!(
            query,
            records = count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(())
    }

    async fn search_batch<W: Write>(
        &self,
        out: &mut W,
        queries: &[String],
        limit: Option<usize>,
        concurrency: Option<usize>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(concurrency) = concurrency {
            config.batch_concurrency = concurrency;
        }

        let search = Search::new(config, build_auth_config(&self.cli.auth)?)?;
        let start = Instant::now();
        let results = search.run_batch(queries, limit).await?;

        for records in &results {
            self.output(out, records)?;
        }

        info!(
            queries = queries.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch complete"
        );
        Ok(())
    }

    /// Write one value in the selected format
    fn output<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Build the session config from command-line flags
fn build_auth_config(args: &AuthArgs) -> Result<AuthConfig> {
    let bearer = args.bearer.clone();

    match (&args.auth_token, &args.csrf_token) {
        (Some(auth_token), Some(csrf_token)) => {
            let bearer =
                bearer.ok_or_else(|| Error::config("--auth-token requires --bearer"))?;
            return Ok(AuthConfig::session(bearer, auth_token, csrf_token));
        }
        (None, None) => {}
        _ => {
            return Err(Error::config(
                "--auth-token and --csrf-token must be given together",
            ))
        }
    }

    if args.guest {
        let bearer = bearer.ok_or_else(|| Error::config("--guest requires --bearer"))?;
        return Ok(AuthConfig::guest(bearer));
    }

    Ok(bearer.map_or(AuthConfig::None, AuthConfig::bearer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::page_body;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(bearer: Option<&str>, guest: bool, session: Option<(&str, &str)>) -> AuthArgs {
        AuthArgs {
            bearer: bearer.map(String::from),
            guest,
            auth_token: session.map(|(t, _)| t.to_string()),
            csrf_token: session.map(|(_, c)| c.to_string()),
        }
    }

    #[test]
    fn test_build_auth_config_variants() {
        assert!(matches!(
            build_auth_config(&args(None, false, None)).unwrap(),
            AuthConfig::None
        ));
        assert!(matches!(
            build_auth_config(&args(Some("b"), false, None)).unwrap(),
            AuthConfig::Bearer { token } if token == "b"
        ));
        assert!(matches!(
            build_auth_config(&args(Some("b"), true, None)).unwrap(),
            AuthConfig::Guest { bearer, .. } if bearer == "b"
        ));
        assert!(matches!(
            build_auth_config(&args(Some("b"), false, Some(("t", "c")))).unwrap(),
            AuthConfig::Session { auth_token, csrf_token, .. } if auth_token == "t" && csrf_token == "c"
        ));
    }

    #[test]
    fn test_build_auth_config_requires_bearer() {
        assert!(build_auth_config(&args(None, true, None)).is_err());
        assert!(build_auth_config(&args(None, false, Some(("t", "c")))).is_err());
    }

    fn config_file(server: &MockServer) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "endpoint: {}/search\nretry:\n  max_attempts: 1\n",
            server.uri()
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn test_run_prints_json_lines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 3, vec![])))
            .mount(&server)
            .await;

        let file = config_file(&server);
        let config_path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["tweet-search", "-C", &config_path, "run", "rust"]).unwrap();

        let mut out = Vec::new();
        Runner::new(cli).run_to(&mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "0");
        assert_eq!(first["user_screen_name"], "user1");
    }

    #[tokio::test]
    async fn test_batch_prints_one_array_per_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "foo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 2, vec![])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "bar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(10, 1, vec![])))
            .mount(&server)
            .await;

        let file = config_file(&server);
        let config_path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "tweet-search",
            "-C",
            &config_path,
            "batch",
            "foo",
            "bar",
        ])
        .unwrap();

        let mut out = Vec::new();
        Runner::new(cli).run_to(&mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let arrays: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays[0].as_array().unwrap().len(), 2);
        assert_eq!(arrays[1][0]["id"], "10");
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let cli = Cli::try_parse_from([
            "tweet-search",
            "-C",
            "/nonexistent/search.yaml",
            "run",
            "rust",
        ])
        .unwrap();

        let err = Runner::new(cli).run_to(&mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_config_command_prints_yaml() {
        let cli = Cli::try_parse_from(["tweet-search", "config"]).unwrap();

        let mut out = Vec::new();
        Runner::new(cli).run_to(&mut out).await.unwrap();

        let parsed = SearchConfig::from_yaml(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed.retry.max_attempts, 12);
        assert_eq!(parsed.safe_chars, "()");
    }
}
