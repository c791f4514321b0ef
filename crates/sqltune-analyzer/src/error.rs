//! Error types for table analysis

use sqltune_core::TuneError;
use thiserror::Error;

/// Errors raised while gathering statistics
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// One or more of a table's metadata queries failed
    #[error("analysis of table '{table}' failed: {source}")]
    Table {
        table: String,
        #[source]
        source: TuneError,
    },

    #[error(transparent)]
    Core(#[from] TuneError),
}

impl AnalyzerError {
    /// The table the error belongs to, if it is table-specific
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Table { table, .. } => Some(table),
            Self::Core(_) => None,
        }
    }
}
