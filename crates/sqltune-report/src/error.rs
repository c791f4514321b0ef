//! Report rendering errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown report format '{0}' (expected plain, table, html or json)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
