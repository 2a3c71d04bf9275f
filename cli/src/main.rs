//! CLI entrypoint for Ensemble Governor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use ensemble_application::{
    HandleQueryUseCase, NoObserver, PipelineObserver, SpecialistGateway,
};
use ensemble_domain::{ErrorCode, Query, QueryReport, Severity};
use ensemble_infrastructure::{ConfigLoader, FileConfig, JsonlDecisionLogger, RoutingSpecialistGateway};
use ensemble_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        println!("Configuration sources (lowest to highest priority):");
        for source in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("  {}", source);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };

    report_config_warnings(&file_config);
    let governor_config = file_config.to_governor_config()?;
    ConsoleFormatter::set_color_enabled(file_config.output.color);

    let Some(text) = cli.query.clone() else {
        bail!("A query is required. Use --show-config to inspect configuration sources.");
    };

    // === Dependency Injection ===
    let gateway = Arc::new(
        RoutingSpecialistGateway::with_default_adapters()
            .context("failed to build specialist transports")?,
    );
    info!(
        specialists = governor_config.registry().len(),
        transports = ?gateway.kinds(),
        "Starting Ensemble Governor"
    );

    let mut use_case = HandleQueryUseCase::new(gateway, governor_config);
    if let Some(path) = file_config.decision_log.resolved_path() {
        match JsonlDecisionLogger::new(&path) {
            Some(logger) => use_case = use_case.with_decision_logger(Arc::new(logger)),
            None => warn!("Decision log disabled: cannot open {}", path.display()),
        }
    }

    let mut query = match Query::new(text) {
        Ok(query) => query,
        Err(e) => {
            let payload = e.to_payload(None);
            eprintln!("Error [{}] {}", payload.code, payload.reason);
            return Ok(ExitCode::from(exit_code(Some(payload.code))));
        }
    };
    if let Some(context) = cli.context.clone() {
        query = query.with_context(context);
    }
    if let Some(budget) = cli.budget() {
        query = query.with_budget(budget);
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling query");
            ctrl_c.cancel();
        }
    });

    let report = run(&use_case, query, &cancel, cli.quiet).await;

    let format = cli.resolve_format(file_config.output.format);
    println!("{}", ConsoleFormatter.render(&report, format));

    Ok(ExitCode::from(exit_code(report.error().map(|e| e.code))))
}

async fn run<G: SpecialistGateway + 'static>(
    use_case: &HandleQueryUseCase<G>,
    query: Query,
    cancel: &CancellationToken,
    quiet: bool,
) -> QueryReport {
    let observer: Box<dyn PipelineObserver> = if quiet {
        Box::new(NoObserver)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    use_case.execute_with(query, observer.as_ref(), cancel).await
}

/// Process exit status for a finished query
fn exit_code(error: Option<ErrorCode>) -> u8 {
    match error {
        None => 0,
        Some(ErrorCode::NoCandidates) => 2,
        Some(ErrorCode::NoVerifiedCandidate) => 3,
        Some(ErrorCode::DeadlineExceeded) => 4,
        Some(_) => 1,
    }
}

fn report_config_warnings(config: &FileConfig) {
    for issue in config.validate() {
        if issue.severity == Severity::Warning {
            eprintln!("warning: {}", issue.message);
        }
    }
}

/// Logs go to stderr unless `--log-file` is given. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        },
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}
