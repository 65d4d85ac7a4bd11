//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for `ask`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the judge's chosen answer
    Answer,
    /// Every provider outcome with status and timing
    Full,
    /// The aggregated response as JSON
    Json,
}

/// CLI arguments for llm-ensemble
#[derive(Parser, Debug)]
#[command(name = "llm-ensemble")]
#[command(author, version, about = "LLM Ensemble - Ask several models at once, keep the fastest answer")]
#[command(long_about = r#"
LLM Ensemble sends a query to several model providers concurrently and
returns the answer of the fastest provider that succeeded, together with
every provider's outcome. Answers are cached for an hour.

Configuration files are loaded from (in priority order):
1. ENSEMBLE_* environment variables
2. --config <path>     Explicit config file
3. ./ensemble.toml     Project-level config
4. ~/.config/llm-ensemble/config.toml   Global config

Example:
  llm-ensemble ask "What is 2+2?"
  llm-ensemble ask -o full "Explain the borrow checker"
  llm-ensemble --cache memory serve --bind 0.0.0.0:8000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Override the cache backend
    #[arg(long, global = true, value_name = "BACKEND", value_parser = ["redis", "memory", "none"])]
    pub cache: Option<String>,

    /// Also write logs to daily-rolling files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one query through the ensemble
    Ask {
        /// The query to send to every provider
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "answer")]
        output: OutputFormat,
    },

    /// Serve the ensemble over HTTP
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_output() {
        let cli = Cli::parse_from(["llm-ensemble", "-vv", "ask", "-o", "json", "What is 2+2?"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Ask { query, output }) => {
                assert_eq!(query, "What is 2+2?");
                assert_eq!(output, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["llm-ensemble", "serve", "--bind", "0.0.0.0:9000", "--cache", "memory"]);
        assert_eq!(cli.cache.as_deref(), Some("memory"));
        assert!(matches!(
            cli.command,
            Some(Command::Serve { bind: Some(ref b) }) if b == "0.0.0.0:9000"
        ));
    }

    #[test]
    fn test_unknown_cache_backend_rejected() {
        let result = Cli::try_parse_from(["llm-ensemble", "--cache", "memcached", "ask", "hi"]);
        assert!(result.is_err());
    }
}
