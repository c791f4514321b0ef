//! Static HTML report
//!
//! Rendered with MiniJinja. Auto-escaping is always on: table names, index
//! comments and error messages come straight from the database.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use sqltune_analyzer::{AnalysisReport, Suggestion};

use crate::Result;

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE_SOURCE: &str = include_str!("html/report.html");

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "Schema optimization report";

#[derive(Serialize)]
struct HtmlContext<'a> {
    title: &'a str,
    outcome: String,
    failed: bool,
    tables_analyzed: usize,
    suggestion_count: usize,
    warning_count: usize,
    duration_ms: u64,
    groups: Vec<HtmlGroup<'a>>,
    failures: &'a [sqltune_analyzer::TableFailure],
}

#[derive(Serialize)]
struct HtmlGroup<'a> {
    table: &'a str,
    suggestions: Vec<HtmlSuggestion<'a>>,
}

#[derive(Serialize)]
struct HtmlSuggestion<'a> {
    severity: &'static str,
    kind: &'static str,
    message: &'a str,
    columns: &'a [String],
}

impl<'a> From<&'a Suggestion> for HtmlSuggestion<'a> {
    fn from(suggestion: &'a Suggestion) -> Self {
        Self {
            severity: suggestion.severity.as_str(),
            kind: suggestion.suggestion_type.description(),
            message: &suggestion.message,
            columns: &suggestion.columns,
        }
    }
}

/// Standalone HTML document with suggestions grouped by table
pub fn render_html(report: &AnalysisReport) -> Result<String> {
    render_html_with_title(report, DEFAULT_TITLE)
}

/// Like `render_html`, with a custom page title
pub fn render_html_with_title(report: &AnalysisReport, title: &str) -> Result<String> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;

    let groups = report
        .grouped_by_table()
        .into_iter()
        .map(|(table, suggestions)| HtmlGroup {
            table,
            suggestions: suggestions.into_iter().map(HtmlSuggestion::from).collect(),
        })
        .collect();

    let context = HtmlContext {
        title,
        outcome: report.outcome.to_string(),
        failed: matches!(
            report.outcome,
            sqltune_analyzer::AnalysisOutcome::Failed { .. }
        ),
        tables_analyzed: report.tables_analyzed.len(),
        suggestion_count: report.suggestions.len(),
        warning_count: report.warning_count(),
        duration_ms: report.duration_ms,
        groups,
        failures: &report.failures,
    };

    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(&context)?)
}
