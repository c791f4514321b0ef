//! Command-line arguments

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use sqltune_analyzer::AnalyzerConfig;
use sqltune_core::{ConnectionConfig, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use sqltune_report::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "sqltune")]
#[command(about = "Inspect a MySQL schema and suggest optimizations")]
#[command(version)]
pub struct Cli {
    /// Database server host
    #[arg(long, env = "DB_HOST")]
    pub host: Option<String>,

    /// Database server port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database user
    #[arg(short, long, env = "DB_USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database (schema) to analyze
    #[arg(short, long, env = "DB_NAME")]
    pub database: Option<String>,

    /// Output format: plain, table, html or json
    #[arg(
        short,
        long,
        default_value = "table",
        value_parser = clap::builder::ValueParser::new(ReportFormat::from_str)
    )]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only analyze these tables (repeatable)
    #[arg(short, long = "table", value_name = "NAME")]
    pub tables: Vec<String>,

    /// Suggest partitioning above this many rows
    #[arg(long, default_value_t = 100_000)]
    pub partition_threshold: u64,

    /// Flag columns with fewer distinct values than this
    #[arg(long, default_value_t = 10)]
    pub cardinality_threshold: u64,

    /// Skip data-type suggestions
    #[arg(long)]
    pub skip_data_types: bool,

    /// Maximum concurrent sessions used per table
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored when stderr is a terminal
    Pretty,
    /// One JSON object per line
    Json,
}

impl Cli {
    /// Connection settings, validated.
    ///
    /// Every missing required value is reported in one error.
    pub fn connection_config(&self) -> sqltune_core::Result<ConnectionConfig> {
        let config = ConnectionConfig::new(
            self.host.clone().unwrap_or_default(),
            self.user.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
            self.database.clone().unwrap_or_default(),
        )
        .with_port(self.port)
        .with_max_connections(self.max_connections);

        config.validate()?;
        Ok(config)
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::new()
            .with_partition_row_threshold(self.partition_threshold)
            .with_low_cardinality_threshold(self.cardinality_threshold)
            .with_check_data_types(!self.skip_data_types)
            .with_tables(self.tables.clone())
    }
}
