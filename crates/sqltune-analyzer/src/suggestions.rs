//! Optimization suggestions
//!
//! Turns a `TableStatistics` record into suggestions by applying independent
//! threshold rules in a fixed order: indexes, row count, cardinality, unused
//! indexes, foreign keys, data types.

use serde::{Deserialize, Serialize};

use crate::{TableStatistics, data_type_optimizations};

/// Severity level for suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    /// Likely to hurt performance as the table grows
    Warning,
    /// Worth reviewing
    Info,
}

impl SeverityLevel {
    /// Returns true if this is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning)
    }

    /// Returns the severity level as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Type of optimization suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    /// Table has no index at all
    MissingIndex,
    /// Row count above the partitioning threshold
    Partitioning,
    /// Columns with few distinct values
    LowCardinality,
    /// Indexes flagged unused by the engine
    UnusedIndexes,
    /// No unique secondary index, taken as no foreign keys
    MissingForeignKeys,
    /// Column type has a cheaper replacement
    DataType,
}

impl SuggestionType {
    /// Returns the suggestion type as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingIndex => "missing_index",
            Self::Partitioning => "partitioning",
            Self::LowCardinality => "low_cardinality",
            Self::UnusedIndexes => "unused_indexes",
            Self::MissingForeignKeys => "missing_foreign_keys",
            Self::DataType => "data_type",
        }
    }

    /// Returns a human-readable description of this suggestion type
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingIndex => "Missing index",
            Self::Partitioning => "Large table",
            Self::LowCardinality => "Low-cardinality columns",
            Self::UnusedIndexes => "Unused indexes",
            Self::MissingForeignKeys => "Missing foreign keys",
            Self::DataType => "Data type",
        }
    }
}

/// A single optimization suggestion tied to one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Table the suggestion is about
    pub table: String,
    /// Type of suggestion
    pub suggestion_type: SuggestionType,
    /// Severity level
    pub severity: SeverityLevel,
    /// Human-readable suggestion text
    pub message: String,
    /// Related column names, if applicable
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl Suggestion {
    /// Creates a new suggestion
    pub fn new(
        table: impl Into<String>,
        suggestion_type: SuggestionType,
        severity: SeverityLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            suggestion_type,
            severity,
            message: message.into(),
            columns: Vec::new(),
        }
    }

    /// Sets the related columns
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.table, self.message)
    }
}

/// Configuration for the table analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Tables with more rows than this get a partitioning suggestion
    pub partition_row_threshold: u64,
    /// Columns with fewer distinct values than this count as low-cardinality
    pub low_cardinality_threshold: u64,
    /// Whether to run the data-type pass
    pub check_data_types: bool,
    /// Restrict the run to these tables; empty means all tables
    pub tables: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            partition_row_threshold: 100_000,
            low_cardinality_threshold: 10,
            check_data_types: true,
            tables: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partitioning threshold
    pub fn with_partition_row_threshold(mut self, threshold: u64) -> Self {
        self.partition_row_threshold = threshold;
        self
    }

    /// Sets the low-cardinality threshold
    pub fn with_low_cardinality_threshold(mut self, threshold: u64) -> Self {
        self.low_cardinality_threshold = threshold;
        self
    }

    /// Sets whether to suggest data-type changes
    pub fn with_check_data_types(mut self, check: bool) -> Self {
        self.check_data_types = check;
        self
    }

    /// Limits the run to the given tables
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    /// Returns true if the table should be analyzed
    pub fn includes_table(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|t| t == table)
    }

    /// Allow-listed tables absent from `listed`, in allow-list order
    pub fn missing_tables(&self, listed: &[String]) -> Vec<String> {
        self.tables
            .iter()
            .filter(|wanted| !listed.contains(*wanted))
            .cloned()
            .collect()
    }
}

/// Applies every rule to one table's statistics, in rule order
pub fn generate_suggestions(stats: &TableStatistics, config: &AnalyzerConfig) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    check_missing_index(stats, &mut suggestions);
    check_row_count(stats, config, &mut suggestions);
    check_low_cardinality(stats, &mut suggestions);
    check_unused_indexes(stats, &mut suggestions);
    check_foreign_keys(stats, &mut suggestions);

    if config.check_data_types {
        suggestions.extend(data_type_optimizations(&stats.table, &stats.column_data_types));
    }

    suggestions
}

fn check_missing_index(stats: &TableStatistics, suggestions: &mut Vec<Suggestion>) {
    if stats.index_count == 0 {
        suggestions.push(Suggestion::new(
            &stats.table,
            SuggestionType::MissingIndex,
            SeverityLevel::Warning,
            format!(
                "Table '{}' has no indexes. Consider adding an index.",
                stats.table
            ),
        ));
    }
}

fn check_row_count(
    stats: &TableStatistics,
    config: &AnalyzerConfig,
    suggestions: &mut Vec<Suggestion>,
) {
    if stats.row_count > config.partition_row_threshold {
        suggestions.push(Suggestion::new(
            &stats.table,
            SuggestionType::Partitioning,
            SeverityLevel::Info,
            format!(
                "Table '{}' has {} rows. Consider partitioning it.",
                stats.table, stats.row_count
            ),
        ));
    }
}

fn check_low_cardinality(stats: &TableStatistics, suggestions: &mut Vec<Suggestion>) {
    if stats.column_cardinality.is_empty() {
        return;
    }

    let listed: Vec<String> = stats
        .column_cardinality
        .iter()
        .map(|c| format!("{} ({})", c.column, c.cardinality))
        .collect();

    suggestions.push(
        Suggestion::new(
            &stats.table,
            SuggestionType::LowCardinality,
            SeverityLevel::Info,
            format!(
                "Low-cardinality columns in '{}': {}. Consider adding an index or partitioning on these columns.",
                stats.table,
                listed.join(", ")
            ),
        )
        .with_columns(
            stats
                .column_cardinality
                .iter()
                .map(|c| c.column.clone())
                .collect(),
        ),
    );
}

fn check_unused_indexes(stats: &TableStatistics, suggestions: &mut Vec<Suggestion>) {
    if stats.unused_indexes.is_empty() {
        return;
    }

    let listed: Vec<&str> = stats
        .unused_indexes
        .iter()
        .map(|u| u.index_name.as_str())
        .collect();

    suggestions.push(Suggestion::new(
        &stats.table,
        SuggestionType::UnusedIndexes,
        SeverityLevel::Warning,
        format!(
            "Unused indexes on '{}': {}. Consider removing them.",
            stats.table,
            listed.join(" | ")
        ),
    ));
}

fn check_foreign_keys(stats: &TableStatistics, suggestions: &mut Vec<Suggestion>) {
    if !stats.has_foreign_keys {
        suggestions.push(Suggestion::new(
            &stats.table,
            SuggestionType::MissingForeignKeys,
            SeverityLevel::Info,
            format!(
                "Table '{}' has no foreign keys. Consider adding foreign keys to enforce referential integrity.",
                stats.table
            ),
        ));
    }
}
