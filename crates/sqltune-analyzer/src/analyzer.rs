//! Table analyzer
//!
//! Drives a full run: connect, list tables, gather statistics for each table
//! one at a time, apply the suggestion rules, then close the connection.
//! Failures are reported in the `AnalysisReport` instead of being swallowed.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sqltune_core::{ConnectionManager, Value};

use crate::{
    AnalyzerConfig, AnalyzerError, ColumnCardinality, Suggestion, TableStatistics,
    generate_suggestions, low_cardinality_columns, queries,
};

/// A table whose statistics could not be gathered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFailure {
    pub table: String,
    pub error: String,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Every listed table was analyzed
    Complete,
    /// Some tables failed; the rest produced suggestions
    Partial { failed_tables: usize },
    /// The run could not start or could not list tables
    Failed { error: String },
}

impl AnalysisOutcome {
    /// Returns the outcome name as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial { .. } => "partial",
            Self::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Partial { failed_tables } => {
                write!(f, "partial ({} table(s) failed)", failed_tables)
            }
            Self::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Result of `TableAnalyzer::analyze_tables`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Tables whose statistics were gathered, in analysis order
    pub tables_analyzed: Vec<String>,
    /// Suggestions in table order, then rule order
    pub suggestions: Vec<Suggestion>,
    pub failures: Vec<TableFailure>,
    pub outcome: AnalysisOutcome,
    pub duration_ms: u64,
}

impl AnalysisReport {
    /// Builds a report, deriving the outcome from the failures
    pub fn new(
        tables_analyzed: Vec<String>,
        suggestions: Vec<Suggestion>,
        failures: Vec<TableFailure>,
    ) -> Self {
        let outcome = if failures.is_empty() {
            AnalysisOutcome::Complete
        } else {
            AnalysisOutcome::Partial {
                failed_tables: failures.len(),
            }
        };

        Self {
            tables_analyzed,
            suggestions,
            failures,
            outcome,
            duration_ms: 0,
        }
    }

    /// A run that produced nothing
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            tables_analyzed: Vec::new(),
            suggestions: Vec::new(),
            failures: Vec::new(),
            outcome: AnalysisOutcome::Failed {
                error: error.into(),
            },
            duration_ms: 0,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, AnalysisOutcome::Complete)
    }

    /// Number of warning-level suggestions
    pub fn warning_count(&self) -> usize {
        self.suggestions
            .iter()
            .filter(|s| s.severity.is_warning())
            .count()
    }

    /// Suggestions for one table, in rule order
    pub fn suggestions_for<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Suggestion> {
        self.suggestions.iter().filter(move |s| s.table == table)
    }

    /// Suggestions grouped by table name, groups in first-seen order
    pub fn grouped_by_table(&self) -> Vec<(&str, Vec<&Suggestion>)> {
        let mut groups: Vec<(&str, Vec<&Suggestion>)> = Vec::new();
        for suggestion in &self.suggestions {
            match groups
                .iter_mut()
                .find(|(table, _)| *table == suggestion.table)
            {
                Some((_, members)) => members.push(suggestion),
                None => groups.push((suggestion.table.as_str(), vec![suggestion])),
            }
        }
        groups
    }
}

/// Gathers table statistics and turns them into suggestions
pub struct TableAnalyzer {
    manager: Arc<ConnectionManager>,
    config: AnalyzerConfig,
}

impl TableAnalyzer {
    /// Create an analyzer with the default configuration
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self {
            manager,
            config: AnalyzerConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn manager(&self) -> &Arc<ConnectionManager> {
        &self.manager
    }

    /// Base tables of the current database, in engine order
    #[tracing::instrument(skip(self))]
    pub async fn list_tables(&self) -> Result<Vec<String>, AnalyzerError> {
        let result = self.manager.execute_query(queries::LIST_TABLES, &[]).await?;

        let tables: Vec<String> = result
            .rows
            .iter()
            .filter_map(|row| {
                row.get_string("table_name")
                    .or_else(|| row.get(0).and_then(|v| v.as_str()).map(str::to_string))
            })
            .collect();

        tracing::debug!(count = tables.len(), "listed tables");
        Ok(tables)
    }

    /// Gather statistics for one table.
    ///
    /// The metadata queries run concurrently and all of them must succeed.
    #[tracing::instrument(skip(self), fields(table = %table))]
    pub async fn analyze_table(&self, table: &str) -> Result<TableStatistics, AnalyzerError> {
        let params = [Value::from(table)];

        let (indexes, row_count, cardinality, status, column_types) = tokio::try_join!(
            self.manager.execute_query(queries::INDEX_LISTING, &params),
            self.manager.execute_query(queries::ROW_COUNT, &params),
            self.column_cardinality(table),
            self.manager.execute_query(queries::TABLE_STATUS, &params),
            self.manager.execute_query(queries::COLUMN_TYPES, &params),
        )
        .map_err(|source| AnalyzerError::Table {
            table: table.to_string(),
            source,
        })?;

        let stats = TableStatistics::from_results(
            table,
            &indexes,
            &row_count,
            cardinality,
            &status,
            &column_types,
        );

        tracing::debug!(
            index_count = stats.index_count,
            row_count = stats.row_count,
            low_cardinality = stats.column_cardinality.len(),
            unused_indexes = stats.unused_indexes.len(),
            has_foreign_keys = stats.has_foreign_keys,
            "table statistics gathered"
        );

        Ok(stats)
    }

    /// Like `analyze_table`, but a failure yields the all-zero record.
    ///
    /// The empty record cannot be told apart from a real empty table, so
    /// `analyze_tables` never uses this.
    pub async fn analyze_table_or_empty(&self, table: &str) -> TableStatistics {
        match self.analyze_table(table).await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "returning empty statistics");
                TableStatistics::empty(table)
            }
        }
    }

    /// Analyze every selected table and close the connection.
    ///
    /// Never fails: errors end up in the report's failures or outcome.
    pub async fn analyze_tables(&self) -> AnalysisReport {
        let started = Instant::now();
        let run = self.run().await;

        if let Err(err) = self.manager.close().await {
            tracing::warn!(error = %err, "failed to close database connection");
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match run {
            Ok(report) => {
                tracing::info!(
                    tables = report.tables_analyzed.len(),
                    suggestions = report.suggestions.len(),
                    failures = report.failures.len(),
                    duration_ms,
                    "analysis finished"
                );
                report.with_duration_ms(duration_ms)
            }
            Err(err) => {
                tracing::error!(error = %err, "analysis failed");
                AnalysisReport::failed(err.to_string()).with_duration_ms(duration_ms)
            }
        }
    }

    async fn run(&self) -> Result<AnalysisReport, AnalyzerError> {
        self.manager.ensure_connected().await?;
        let tables = self.list_tables().await?;

        let mut analyzed = Vec::new();
        let mut suggestions = Vec::new();
        let mut failures: Vec<TableFailure> = self
            .config
            .missing_tables(&tables)
            .into_iter()
            .map(|table| {
                tracing::warn!(table = %table, "requested table not found in database");
                TableFailure {
                    error: format!("table '{}' not found in database", table),
                    table,
                }
            })
            .collect();

        for table in tables {
            if !self.config.includes_table(&table) {
                tracing::debug!(table = %table, "skipping table outside allow-list");
                continue;
            }

            match self.analyze_table(&table).await {
                Ok(stats) => {
                    suggestions.extend(generate_suggestions(&stats, &self.config));
                    analyzed.push(table);
                }
                Err(err) => {
                    tracing::warn!(table = %table, error = %err, "table analysis failed; continuing");
                    failures.push(TableFailure {
                        table,
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(AnalysisReport::new(analyzed, suggestions, failures))
    }

    /// Distinct counts for every column, keeping those under the threshold
    async fn column_cardinality(&self, table: &str) -> sqltune_core::Result<Vec<ColumnCardinality>> {
        let names = self
            .manager
            .execute_query(queries::COLUMN_NAMES, &[Value::from(table)])
            .await?;

        let columns: Vec<String> = names
            .rows
            .iter()
            .filter_map(|row| row.get_string("column_name"))
            .collect();

        if columns.is_empty() {
            return Ok(Vec::new());
        }

        let counts = self
            .manager
            .execute_query(&queries::distinct_counts(table, &columns), &[])
            .await?;

        Ok(low_cardinality_columns(
            &columns,
            counts.first_row(),
            self.config.low_cardinality_threshold,
        ))
    }
}

impl std::fmt::Debug for TableAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableAnalyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
