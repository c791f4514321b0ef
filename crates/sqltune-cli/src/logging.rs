//! Logging setup for the command-line tool
//!
//! Logs go to stderr so they never mix with a report written to stdout.
//! `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::args::LogFormat;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Whether to log span close events with their timings
    pub enable_spans: bool,

    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl LoggingConfig {
    /// Build a configuration from the `-v` count
    pub fn from_verbosity(verbose: u8, format: LogFormat) -> Self {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };

        Self {
            format,
            include_location: verbose > 1,
            enable_spans: verbose > 0,
            default_filter: default_filter(level),
        }
    }
}

/// Our crates at `level`, everything else at `warn`
fn default_filter(level: &str) -> String {
    let crates = [
        "sqltune",
        "sqltune_core",
        "sqltune_driver_mysql",
        "sqltune_analyzer",
        "sqltune_report",
    ];
    let mut filter = String::from("warn");
    for name in crates {
        filter.push_str(&format!(",{}={}", name, level));
    }
    filter
}

/// Install the global subscriber
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    let span_events = if config.enable_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(span_events)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(span_events)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(filter = %config.default_filter, "logging initialized");
    Ok(())
}
