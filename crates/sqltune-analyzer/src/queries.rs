//! Metadata queries (MySQL dialect)
//!
//! Every query is scoped to the connection's current database and takes the
//! table name as its only `?` parameter. The distinct-count query is the one
//! exception: column and table names cannot be bound, so they are escaped.

use sqltune_driver_mysql::escape_identifier;

/// Base tables of the current database, in engine order
pub const LIST_TABLES: &str = "SELECT TABLE_NAME AS table_name \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE'";

/// One row per indexed column, shaped like `SHOW INDEX`
pub const INDEX_LISTING: &str = "SELECT INDEX_NAME AS Key_name, \
            SEQ_IN_INDEX AS Seq_in_index, \
            COLUMN_NAME AS Column_name, \
            NON_UNIQUE AS Non_unique, \
            INDEX_TYPE AS Index_type \
     FROM information_schema.STATISTICS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?";

/// Approximate row count maintained by the storage engine
pub const ROW_COUNT: &str = "SELECT TABLE_ROWS AS row_count \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?";

/// Table status comment, shaped like `SHOW TABLE STATUS`
pub const TABLE_STATUS: &str = "SELECT TABLE_NAME AS Name, TABLE_COMMENT AS Comment \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?";

/// Column names with their declared types, in ordinal order
pub const COLUMN_TYPES: &str = "SELECT COLUMN_NAME AS column_name, DATA_TYPE AS data_type \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

/// Column names only; input to the distinct-count query
pub const COLUMN_NAMES: &str = "SELECT COLUMN_NAME AS column_name \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

/// Counts distinct values of every column in a single scan.
///
/// The result has one row whose columns are in the order of `columns`.
pub fn distinct_counts(table: &str, columns: &[String]) -> String {
    let counts: Vec<String> = columns
        .iter()
        .map(|column| format!("COUNT(DISTINCT {})", escape_identifier(column)))
        .collect();
    format!(
        "SELECT {} FROM {}",
        counts.join(", "),
        escape_identifier(table)
    )
}
