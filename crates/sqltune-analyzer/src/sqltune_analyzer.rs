//! sqltune analyzer - schema statistics and optimization suggestions
//!
//! This crate provides functionality for:
//! - Gathering per-table statistics (indexes, row counts, cardinality,
//!   unused-index comments, column types) through a `ConnectionManager`
//! - Turning statistics into ordered, human-readable suggestions
//! - Reporting which tables could not be analyzed

mod analyzer;
mod data_types;
mod error;
pub mod queries;
mod statistics;
mod suggestions;
mod unused_index;

pub use analyzer::*;
pub use data_types::*;
pub use error::*;
pub use statistics::*;
pub use suggestions::*;
pub use unused_index::*;
