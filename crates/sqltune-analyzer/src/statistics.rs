//! Per-table statistics record
//!
//! Each field is derived from its own query result; nothing here depends on
//! another field of the same record.

use serde::{Deserialize, Serialize};
use sqltune_core::{QueryResult, Row};

use crate::{UnusedIndex, parse_unused_indexes};

/// Index name MySQL uses for the primary key
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// Index structure counted by the foreign-key heuristic
pub const BTREE_INDEX_TYPE: &str = "BTREE";

/// One row of the index listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key_name: String,
    pub column_name: Option<String>,
    /// 0 for unique indexes, 1 otherwise
    pub non_unique: i64,
    pub index_type: String,
    pub seq_in_index: u64,
}

impl IndexEntry {
    /// Create an entry for the given index
    pub fn new(key_name: impl Into<String>, index_type: impl Into<String>, non_unique: i64) -> Self {
        Self {
            key_name: key_name.into(),
            column_name: None,
            non_unique,
            index_type: index_type.into(),
            seq_in_index: 1,
        }
    }

    /// Sets the indexed column
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column_name = Some(column.into());
        self
    }

    fn from_row(row: &Row) -> Self {
        Self {
            key_name: row.get_string("Key_name").unwrap_or_default(),
            column_name: row.get_string("Column_name"),
            non_unique: row
                .get_by_name("Non_unique")
                .and_then(|v| v.as_i64())
                .unwrap_or(1),
            index_type: row.get_string("Index_type").unwrap_or_default(),
            seq_in_index: row
                .get_by_name("Seq_in_index")
                .and_then(|v| v.as_u64())
                .unwrap_or(1),
        }
    }
}

/// A column whose distinct-value count fell below the threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCardinality {
    pub column: String,
    pub cardinality: u64,
}

impl ColumnCardinality {
    pub fn new(column: impl Into<String>, cardinality: u64) -> Self {
        Self {
            column: column.into(),
            cardinality,
        }
    }
}

/// A column and its declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDataType {
    pub column: String,
    pub data_type: String,
}

impl ColumnDataType {
    pub fn new(column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            data_type: data_type.into(),
        }
    }
}

/// Statistics gathered for one table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableStatistics {
    pub table: String,
    pub index_count: usize,
    pub row_count: u64,
    pub column_cardinality: Vec<ColumnCardinality>,
    pub unused_indexes: Vec<UnusedIndex>,
    pub has_foreign_keys: bool,
    pub column_data_types: Vec<ColumnDataType>,
}

impl TableStatistics {
    /// The all-zero record.
    ///
    /// Indistinguishable from a table that really has no indexes, rows or
    /// columns, so it must not be fed to the suggestion rules as if it were
    /// measured.
    pub fn empty(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Assembles the record from the raw query results
    pub fn from_results(
        table: &str,
        indexes: &QueryResult,
        row_count: &QueryResult,
        column_cardinality: Vec<ColumnCardinality>,
        status: &QueryResult,
        column_types: &QueryResult,
    ) -> Self {
        let index_entries = index_entries(indexes);
        Self {
            table: table.to_string(),
            index_count: index_entries.len(),
            row_count: parse_row_count(row_count),
            column_cardinality,
            unused_indexes: unused_indexes(status, table),
            has_foreign_keys: has_foreign_keys(&index_entries),
            column_data_types: column_data_types(column_types),
        }
    }
}

/// Decodes the index listing
pub fn index_entries(result: &QueryResult) -> Vec<IndexEntry> {
    result.rows.iter().map(IndexEntry::from_row).collect()
}

/// Reads the row count; a missing or NULL count reads as zero
pub fn parse_row_count(result: &QueryResult) -> u64 {
    result
        .first_row()
        .and_then(|row| row.get_by_name("row_count").or_else(|| row.get(0)))
        .and_then(|value| value.as_u64())
        .unwrap_or(0)
}

/// Collects one unused-index entry per status row that mentions one
pub fn unused_indexes(result: &QueryResult, table: &str) -> Vec<UnusedIndex> {
    result
        .rows
        .iter()
        .filter_map(|row| row.get_string("Comment"))
        .filter_map(|comment| parse_unused_indexes(&comment, table))
        .collect()
}

/// Decodes the column listing, skipping rows without a name
pub fn column_data_types(result: &QueryResult) -> Vec<ColumnDataType> {
    result
        .rows
        .iter()
        .filter_map(|row| {
            let column = row.get_string("column_name")?;
            let data_type = row.get_string("data_type").unwrap_or_default();
            Some(ColumnDataType { column, data_type })
        })
        .collect()
}

/// Foreign-key presence heuristic.
///
/// True if any index is a unique, non-primary B-tree. This does not look at
/// actual foreign-key constraints; a unique secondary index counts.
pub fn has_foreign_keys(indexes: &[IndexEntry]) -> bool {
    indexes.iter().any(|index| {
        index.key_name != PRIMARY_KEY_NAME
            && index.index_type == BTREE_INDEX_TYPE
            && index.non_unique == 0
    })
}

/// Keeps the columns whose distinct count is below `threshold`.
///
/// `counts` is the single row of the distinct-count query; its values are in
/// the same order as `columns`.
pub fn low_cardinality_columns(
    columns: &[String],
    counts: Option<&Row>,
    threshold: u64,
) -> Vec<ColumnCardinality> {
    let Some(counts) = counts else {
        return Vec::new();
    };

    columns
        .iter()
        .enumerate()
        .filter_map(|(idx, column)| {
            let cardinality = counts.get(idx)?.as_u64()?;
            (cardinality < threshold).then(|| ColumnCardinality::new(column.clone(), cardinality))
        })
        .collect()
}
