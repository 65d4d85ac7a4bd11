//! CLI entrypoint for LLM Ensemble
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use ensemble_application::{
    CacheStore, HandleQueryUseCase, JudgeOutcomesUseCase, NoCache, NoProgress, ProgressNotifier,
    RunEnsembleUseCase,
};
use ensemble_domain::Query;
use ensemble_infrastructure::{
    CacheBackend, ConfigLoader, FileConfig, InMemoryCacheStore, RedisCacheStore, build_adapters,
};
use ensemble_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, OutputFormatter, ProgressReporter,
    SimpleProgress, render,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const USER_AGENT: &str = concat!("llm-ensemble/", env!("CARGO_PKG_VERSION"));

/// Install the tracing subscriber. The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace", // -vvv or more
        })
    });

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "llm-ensemble.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(backend) = &cli.cache {
        config.cache.backend = backend.clone();
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let list = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", list);
    }

    Ok(config)
}

fn build_cache(config: &FileConfig) -> Result<Arc<dyn CacheStore>> {
    let backend = config.cache.parse_backend().map_err(anyhow::Error::msg)?;
    info!("Cache backend: {}", backend);

    let cache: Arc<dyn CacheStore> = match backend {
        CacheBackend::Redis => Arc::new(
            RedisCacheStore::new(
                &config.cache.url,
                Duration::from_secs(config.cache.connect_timeout_secs),
            )
            .context("Failed to configure Redis cache")?,
        ),
        CacheBackend::Memory => Arc::new(InMemoryCacheStore::new()),
        CacheBackend::None => Arc::new(NoCache),
    };
    Ok(cache)
}

fn build_handler(config: &FileConfig) -> Result<HandleQueryUseCase> {
    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    // === Dependency Injection ===
    let adapters = build_adapters(config, http).context("Failed to set up providers")?;
    let cache = build_cache(config)?;
    let params = config.ensemble.to_params();

    Ok(HandleQueryUseCase::new(
        cache,
        RunEnsembleUseCase::new(adapters),
        JudgeOutcomesUseCase::fastest_responder(),
    )
    .with_params(&params))
}

async fn run_ask(
    handler: HandleQueryUseCase,
    query: String,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let query = Query::new(query);

    // Ctrl-C aborts in-flight provider calls
    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    tokio::spawn(async move {
        ensemble_presentation::shutdown_signal().await;
        signal_token.cancel();
    });

    let progress: Box<dyn ProgressNotifier> = if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let response = match handler
        .handle_cancellable(&query, progress.as_ref(), &cancellation)
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_cancelled() => {
            warn!("Query cancelled");
            bail!("Cancelled");
        }
        Err(e) => return Err(e).context("Query failed"),
    };

    let formatter: &dyn OutputFormatter = &ConsoleFormatter;
    let rendered = render(formatter, output, &response);
    println!("{}", rendered.trim_end());

    Ok(())
}

async fn run_serve(handler: HandleQueryUseCase, bind: String) -> Result<()> {
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;

    ensemble_presentation::serve(
        listener,
        Arc::new(handler),
        ensemble_presentation::shutdown_signal(),
    )
    .await
    .context("HTTP server failed")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    info!("Starting LLM Ensemble");

    let config = load_config(&cli)?;
    let handler = build_handler(&config)?;

    match command {
        Command::Ask { query, output } => {
            run_ask(handler, query.clone(), *output, cli.quiet).await
        }
        Command::Serve { bind } => {
            let bind = bind.clone().unwrap_or_else(|| config.server.bind.clone());
            run_serve(handler, bind).await
        }
    }
}
