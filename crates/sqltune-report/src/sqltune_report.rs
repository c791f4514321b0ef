//! sqltune report - rendering of analysis reports
//!
//! Every renderer takes an `AnalysisReport` and returns the whole document as
//! a string; writing it out is left to the caller.

mod console;
mod error;
mod html;
mod json;

pub use console::*;
pub use error::*;
pub use html::*;
pub use json::*;

use serde::{Deserialize, Serialize};
use sqltune_analyzer::AnalysisReport;

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One `table: text` line per suggestion
    Plain,
    /// Bordered grid with a summary line
    #[default]
    Table,
    /// Standalone HTML document
    Html,
    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    /// Render the report in this format
    pub fn render(&self, report: &AnalysisReport) -> Result<String> {
        match self {
            Self::Plain => Ok(render_plain(report)),
            Self::Table => Ok(render_table(report)),
            Self::Html => render_html(report),
            Self::Json => render_json(report),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Table => "table",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "table" => Ok(Self::Table),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}
