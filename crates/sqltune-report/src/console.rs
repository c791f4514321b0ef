//! Console renderers

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use sqltune_analyzer::{AnalysisOutcome, AnalysisReport};

/// One `table: text` line per suggestion, then one line per failed table
pub fn render_plain(report: &AnalysisReport) -> String {
    let mut out = String::new();

    for suggestion in &report.suggestions {
        out.push_str(&format!("{}\n", suggestion));
    }

    for failure in &report.failures {
        out.push_str(&format!(
            "{}: analysis failed: {}\n",
            failure.table, failure.error
        ));
    }

    if let AnalysisOutcome::Failed { error } = &report.outcome {
        out.push_str(&format!("analysis failed: {}\n", error));
    }

    out
}

/// Suggestions as a bordered grid followed by a summary line
pub fn render_table(report: &AnalysisReport) -> String {
    let mut out = String::new();

    if !report.suggestions.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Table", "Severity", "Kind", "Suggestion"]);

        for suggestion in &report.suggestions {
            table.add_row(vec![
                suggestion.table.as_str(),
                suggestion.severity.as_str(),
                suggestion.suggestion_type.description(),
                suggestion.message.as_str(),
            ]);
        }

        out.push_str(&table.to_string());
        out.push('\n');
    }

    if !report.failures.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Failed table", "Error"]);

        for failure in &report.failures {
            table.add_row(vec![failure.table.as_str(), failure.error.as_str()]);
        }

        out.push_str(&table.to_string());
        out.push('\n');
    }

    out.push_str(&summary_line(report));
    out.push('\n');
    out
}

/// e.g. `3 suggestion(s) (1 warning) across 2 table(s) in 40 ms; outcome: complete`
pub fn summary_line(report: &AnalysisReport) -> String {
    format!(
        "{} suggestion(s) ({} warning) across {} table(s) in {} ms; outcome: {}",
        report.suggestions.len(),
        report.warning_count(),
        report.tables_analyzed.len(),
        report.duration_ms,
        report.outcome
    )
}
