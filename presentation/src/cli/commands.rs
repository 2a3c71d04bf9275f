//! CLI command definitions

use clap::{Parser, ValueEnum};
use ensemble_domain::OutputFormat as ReportFormat;
use std::path::PathBuf;
use std::time::Duration;

/// Output format for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Answer plus evidence, failures and verification attempts
    Full,
    /// The whole query report as JSON
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => ReportFormat::Answer,
            OutputFormat::Full => ReportFormat::Full,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// CLI arguments for ensemble-governor
#[derive(Parser, Debug)]
#[command(name = "ensemble-governor")]
#[command(author, version, about = "Ask a panel of specialists and return one verified answer")]
#[command(long_about = r#"
Ensemble Governor sends a query to every registered specialist in parallel,
ranks the replies, verifies the best one (falling back down the ranking on
rejection) and synthesizes a single answer with an evidence trail.

Configuration files are loaded from (lowest to highest priority):
1. ~/.config/ensemble-governor/config.toml   Global config
2. ./ensemble.toml or ./.ensemble.toml        Project-level config
3. --config <path>                            Explicit config file
4. ENSEMBLE_* environment variables (e.g. ENSEMBLE_GOVERNOR__DEFAULT_DEADLINE_MS)

Exit codes:
  0  answered
  2  no specialist produced a candidate
  3  every candidate was rejected by verification
  4  the query deadline was exceeded
  1  any other failure

Example:
  ensemble-governor "What is the capital of France?"
  ensemble-governor --context '{"reference_terms":["Paris"]}' -o full "Capital of France?"
"#)]
pub struct Cli {
    /// The query to send to the specialists
    pub query: Option<String>,

    /// Structured context attached to the query, as a JSON value
    #[arg(long, value_name = "JSON", value_parser = parse_context)]
    pub context: Option<serde_json::Value>,

    /// Time budget for this query in milliseconds (overrides the configured default)
    #[arg(long, value_name = "MS")]
    pub budget_ms: Option<u64>,

    /// Output format (defaults to [output] format in config, then "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write tracing output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn budget(&self) -> Option<Duration> {
        self.budget_ms.map(Duration::from_millis)
    }

    /// Command-line format wins over the configured one
    pub fn resolve_format(&self, configured: Option<ReportFormat>) -> ReportFormat {
        self.output
            .map(ReportFormat::from)
            .or(configured)
            .unwrap_or_default()
    }
}

fn parse_context(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("context is not valid JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_context_and_budget() {
        let cli = Cli::try_parse_from([
            "ensemble-governor",
            "--context",
            r#"{"reference_terms":["Paris"]}"#,
            "--budget-ms",
            "250",
            "capital of France?",
        ])
        .unwrap();

        assert_eq!(cli.query.as_deref(), Some("capital of France?"));
        assert_eq!(cli.context.as_ref().unwrap()["reference_terms"][0], "Paris");
        assert_eq!(cli.budget(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_invalid_context_is_rejected() {
        let result = Cli::try_parse_from(["ensemble-governor", "--context", "{oops", "q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_precedence() {
        let cli = Cli::try_parse_from(["ensemble-governor", "q"]).unwrap();
        assert_eq!(cli.resolve_format(None), ReportFormat::Answer);
        assert_eq!(cli.resolve_format(Some(ReportFormat::Full)), ReportFormat::Full);

        let cli = Cli::try_parse_from(["ensemble-governor", "-o", "json", "q"]).unwrap();
        assert_eq!(cli.resolve_format(Some(ReportFormat::Full)), ReportFormat::Json);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["ensemble-governor", "-vv", "q"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
