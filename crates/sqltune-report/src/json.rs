use sqltune_analyzer::AnalysisReport;

use crate::Result;

/// Pretty JSON of the full report
pub fn render_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
