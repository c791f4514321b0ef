//! sqltune - MySQL schema optimization advisor
//!
//! Connects to one database, gathers per-table statistics and prints
//! suggestions in the requested format.
//!
//! Exit codes: 0 when every table was analyzed, 2 when some tables failed,
//! 1 when the run failed or the configuration is invalid.

mod args;
mod logging;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sqltune_analyzer::{AnalysisOutcome, TableAnalyzer};
use sqltune_core::ConnectionManager;
use sqltune_driver_mysql::MySqlConnectionFactory;

use args::Cli;
use logging::LoggingConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = logging::init(LoggingConfig::from_verbosity(cli.verbose, cli.log_format)) {
        eprintln!("error: failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "failed to load .env"),
    }

    match run(&cli).await {
        Ok(outcome) => ExitCode::from(exit_code(&outcome)),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<AnalysisOutcome> {
    let config = cli.connection_config()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "starting schema analysis"
    );

    let manager = Arc::new(ConnectionManager::new(MySqlConnectionFactory::new(config)));
    let analyzer = TableAnalyzer::new(manager).with_config(cli.analyzer_config());
    let report = analyzer.analyze_tables().await;

    let format = cli.format;
    let rendered = format
        .render(&report)
        .with_context(|| format!("failed to render {} report", format))?;

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), format = %format, "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(report.outcome)
}

fn exit_code(outcome: &AnalysisOutcome) -> u8 {
    match outcome {
        AnalysisOutcome::Complete => 0,
        AnalysisOutcome::Partial { .. } => 2,
        AnalysisOutcome::Failed { .. } => 1,
    }
}
