//! Tests for the table analyzer, against a scripted in-memory catalog

use super::*;
use crate::SuggestionType;
use async_trait::async_trait;
use sqltune_core::{Connection, ConnectionFactory, QueryResult, Result, TuneError};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;

/// Queries `analyze_table` issues up front, one per statistic
const PER_TABLE_QUERIES: [&str; 5] = [
    queries::INDEX_LISTING,
    queries::ROW_COUNT,
    queries::COLUMN_NAMES,
    queries::TABLE_STATUS,
    queries::COLUMN_TYPES,
];

/// Catalog entry for one table
#[derive(Clone, Default)]
struct FakeTable {
    name: &'static str,
    /// (key, column, non_unique, index_type)
    indexes: Vec<(&'static str, &'static str, i64, &'static str)>,
    rows: u64,
    comment: &'static str,
    /// (column, data_type, distinct values)
    columns: Vec<(&'static str, &'static str, i64)>,
    /// Index listing errors out for this table
    broken: bool,
}

impl FakeTable {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// A table that triggers no rule
    fn healthy(name: &'static str) -> Self {
        Self {
            name,
            indexes: vec![
                ("PRIMARY", "id", 0, "BTREE"),
                ("uq_email", "email", 0, "BTREE"),
            ],
            rows: 50,
            columns: vec![("id", "smallint", 50), ("email", "varchar", 50)],
            ..Self::default()
        }
    }
}

struct FakeCatalog {
    tables: Vec<FakeTable>,
    fail_listing: bool,
}

impl FakeCatalog {
    fn table(&self, params: &[Value]) -> Result<&FakeTable> {
        let name = params.first().and_then(|v| v.as_str()).unwrap_or_default();
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TuneError::Query(format!("unknown table {}", name)))
    }

    fn answer(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        if sql == queries::LIST_TABLES {
            if self.fail_listing {
                return Err(TuneError::Query("SELECT command denied".into()));
            }
            return Ok(QueryResult::from_rows(
                &["table_name"],
                self.tables.iter().map(|t| vec![Value::from(t.name)]).collect(),
            ));
        }

        if sql == queries::INDEX_LISTING {
            let table = self.table(params)?;
            if table.broken {
                return Err(TuneError::Query(format!(
                    "Table '{}' doesn't exist",
                    table.name
                )));
            }
            return Ok(QueryResult::from_rows(
                &["Key_name", "Seq_in_index", "Column_name", "Non_unique", "Index_type"],
                table
                    .indexes
                    .iter()
                    .map(|(key, column, non_unique, index_type)| {
                        vec![
                            Value::from(*key),
                            Value::UInt64(1),
                            Value::from(*column),
                            Value::Int64(*non_unique),
                            Value::from(*index_type),
                        ]
                    })
                    .collect(),
            ));
        }

        if sql == queries::ROW_COUNT {
            let table = self.table(params)?;
            return Ok(QueryResult::from_rows(
                &["row_count"],
                vec![vec![Value::UInt64(table.rows)]],
            ));
        }

        if sql == queries::TABLE_STATUS {
            let table = self.table(params)?;
            return Ok(QueryResult::from_rows(
                &["Name", "Comment"],
                vec![vec![Value::from(table.name), Value::from(table.comment)]],
            ));
        }

        if sql == queries::COLUMN_TYPES {
            let table = self.table(params)?;
            return Ok(QueryResult::from_rows(
                &["column_name", "data_type"],
                table
                    .columns
                    .iter()
                    .map(|(column, data_type, _)| vec![Value::from(*column), Value::from(*data_type)])
                    .collect(),
            ));
        }

        if sql == queries::COLUMN_NAMES {
            let table = self.table(params)?;
            return Ok(QueryResult::from_rows(
                &["column_name"],
                table
                    .columns
                    .iter()
                    .map(|(column, _, _)| vec![Value::from(*column)])
                    .collect(),
            ));
        }

        for table in &self.tables {
            let columns: Vec<String> = table.columns.iter().map(|c| c.0.to_string()).collect();
            if !columns.is_empty() && sql == queries::distinct_counts(table.name, &columns) {
                let names: Vec<&str> = table.columns.iter().map(|c| c.0).collect();
                return Ok(QueryResult::from_rows(
                    &names,
                    vec![table.columns.iter().map(|c| Value::Int64(c.2)).collect()],
                ));
            }
        }

        Err(TuneError::Query(format!("unexpected query: {}", sql)))
    }
}

struct FakeConnection {
    catalog: Arc<FakeCatalog>,
    closed: AtomicBool,
    close_count: Arc<AtomicU32>,
    /// Per-table queries wait here before answering
    gate: Option<Arc<Barrier>>,
}

#[async_trait]
impl Connection for FakeConnection {
    fn driver_name(&self) -> &str {
        "fake"
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        if let Some(gate) = &self.gate {
            if PER_TABLE_QUERIES.iter().any(|q| *q == sql) {
                gate.wait().await;
            }
        }
        self.catalog.answer(sql, params)
    }

    async fn close(&self) -> Result<()> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeFactory {
    catalog: Arc<FakeCatalog>,
    close_count: Arc<AtomicU32>,
    unreachable: bool,
    gate: Option<Arc<Barrier>>,
}

#[async_trait]
impl ConnectionFactory for FakeFactory {
    async fn create(&self) -> Result<Arc<dyn Connection>> {
        if self.unreachable {
            return Err(TuneError::Connection(
                "Can't connect to MySQL server on 'db:3306'".into(),
            ));
        }
        Ok(Arc::new(FakeConnection {
            catalog: self.catalog.clone(),
            closed: AtomicBool::new(false),
            close_count: self.close_count.clone(),
            gate: self.gate.clone(),
        }))
    }
}

struct Harness {
    analyzer: TableAnalyzer,
    close_count: Arc<AtomicU32>,
}

fn harness(tables: Vec<FakeTable>) -> Harness {
    build(tables, false, false)
}

fn build(tables: Vec<FakeTable>, fail_listing: bool, unreachable: bool) -> Harness {
    assemble(tables, fail_listing, unreachable, None)
}

/// Harness whose per-table queries only return once all of them are in flight
fn gated(tables: Vec<FakeTable>) -> Harness {
    let gate = Arc::new(Barrier::new(PER_TABLE_QUERIES.len()));
    assemble(tables, false, false, Some(gate))
}

fn assemble(
    tables: Vec<FakeTable>,
    fail_listing: bool,
    unreachable: bool,
    gate: Option<Arc<Barrier>>,
) -> Harness {
    let close_count = Arc::new(AtomicU32::new(0));
    let factory = FakeFactory {
        catalog: Arc::new(FakeCatalog {
            tables,
            fail_listing,
        }),
        close_count: close_count.clone(),
        unreachable,
        gate,
    };
    Harness {
        analyzer: TableAnalyzer::new(Arc::new(ConnectionManager::new(factory))),
        close_count,
    }
}

fn kinds_for(report: &AnalysisReport, table: &str) -> Vec<SuggestionType> {
    report
        .suggestions_for(table)
        .map(|s| s.suggestion_type)
        .collect()
}

mod statistics_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_tables_in_engine_order() {
        let h = harness(vec![FakeTable::new("b"), FakeTable::new("a")]);
        assert_eq!(h.analyzer.list_tables().await.unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_analyze_table_gathers_every_field() {
        let h = harness(vec![FakeTable {
            name: "orders",
            indexes: vec![("PRIMARY", "id", 0, "BTREE"), ("idx_status", "status", 1, "BTREE")],
            rows: 150_000,
            comment: "Unused, index_a; Active, index_b",
            columns: vec![("id", "bigint", 150_000), ("status", "varchar", 3)],
            broken: false,
        }]);

        let stats = h.analyzer.analyze_table("orders").await.unwrap();

        assert_eq!(stats.index_count, 2);
        assert_eq!(stats.row_count, 150_000);
        assert_eq!(stats.column_cardinality, vec![ColumnCardinality::new("status", 3)]);
        assert_eq!(stats.unused_indexes.len(), 1);
        assert!(stats.unused_indexes[0].index_name.contains("Unused, index_a"));
        assert!(!stats.has_foreign_keys);
        assert_eq!(stats.column_data_types.len(), 2);
    }

    #[tokio::test]
    async fn test_table_without_columns_skips_distinct_counts() {
        let h = harness(vec![FakeTable::new("empty")]);
        let stats = h.analyzer.analyze_table("empty").await.unwrap();
        assert!(stats.column_cardinality.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_table_reports_the_failing_table() {
        let h = harness(vec![FakeTable {
            broken: true,
            ..FakeTable::new("ghost")
        }]);

        let err = h.analyzer.analyze_table("ghost").await.unwrap_err();

        assert_eq!(err.table(), Some("ghost"));
        assert!(err.to_string().contains("doesn't exist"));
    }

    #[tokio::test]
    async fn test_table_queries_are_in_flight_together() {
        let h = gated(vec![FakeTable::healthy("users")]);

        let stats = tokio::time::timeout(
            Duration::from_secs(5),
            h.analyzer.analyze_table("users"),
        )
        .await
        .expect("table queries ran one after another")
        .unwrap();

        assert_eq!(stats.index_count, 2);
        assert_eq!(stats.row_count, 50);
    }

    #[tokio::test]
    async fn test_analyze_table_or_empty_falls_back() {
        let h = harness(vec![FakeTable {
            broken: true,
            ..FakeTable::new("ghost")
        }]);

        let stats = h.analyzer.analyze_table_or_empty("ghost").await;
        assert_eq!(stats, TableStatistics::empty("ghost"));
    }
}

mod run_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_zero_tables_is_complete() {
        let h = harness(Vec::new());

        let report = h.analyzer.analyze_tables().await;

        assert_eq!(report.outcome, AnalysisOutcome::Complete);
        assert!(report.suggestions.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(h.close_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_suggestions_follow_table_then_rule_order() {
        let h = harness(vec![
            FakeTable {
                rows: 200_000,
                ..FakeTable::new("logs")
            },
            FakeTable::healthy("users"),
            FakeTable {
                columns: vec![("id", "int", 80)],
                ..FakeTable::healthy("tags")
            },
        ]);

        let report = h.analyzer.analyze_tables().await;

        assert!(report.is_complete());
        assert_eq!(report.tables_analyzed, vec!["logs", "users", "tags"]);
        assert_eq!(
            kinds_for(&report, "logs"),
            vec![
                SuggestionType::MissingIndex,
                SuggestionType::Partitioning,
                SuggestionType::MissingForeignKeys,
            ]
        );
        assert!(kinds_for(&report, "users").is_empty());
        assert_eq!(kinds_for(&report, "tags"), vec![SuggestionType::DataType]);

        let tables: Vec<&str> = report.suggestions.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(tables, vec!["logs", "logs", "logs", "tags"]);
    }

    #[tokio::test]
    async fn test_failed_table_does_not_stop_the_run() {
        let h = harness(vec![
            FakeTable::new("first"),
            FakeTable {
                broken: true,
                ..FakeTable::new("broken")
            },
            FakeTable::new("last"),
        ]);

        let report = h.analyzer.analyze_tables().await;

        assert_eq!(report.outcome, AnalysisOutcome::Partial { failed_tables: 1 });
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].table, "broken");
        assert_eq!(report.suggestions_for("broken").count(), 0);
        assert!(report.suggestions_for("first").count() > 0);
        assert!(report.suggestions_for("last").count() > 0);
        assert_eq!(h.close_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connection_failure_is_failed() {
        let h = build(vec![FakeTable::new("users")], false, true);

        let report = h.analyzer.analyze_tables().await;

        assert!(matches!(report.outcome, AnalysisOutcome::Failed { .. }));
        assert!(report.suggestions.is_empty());
        assert!(h.close_count.load(Ordering::SeqCst) <= 1);
    }

    #[tokio::test]
    async fn test_listing_failure_is_failed_and_closes_once() {
        let h = build(vec![FakeTable::new("users")], true, false);

        let report = h.analyzer.analyze_tables().await;

        match &report.outcome {
            AnalysisOutcome::Failed { error } => assert!(error.contains("denied")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(report.suggestions.is_empty());
        assert_eq!(h.close_count.load(Ordering::SeqCst), 1);
        assert!(!h.analyzer.manager().is_connected().await);
    }

    #[tokio::test]
    async fn test_allow_list_keeps_listing_order() {
        let h = harness(vec![
            FakeTable::new("a"),
            FakeTable::new("b"),
            FakeTable::new("c"),
        ]);
        let analyzer = h
            .analyzer
            .with_config(AnalyzerConfig::new().with_tables(vec!["c".into(), "a".into()]));

        let report = analyzer.analyze_tables().await;

        assert_eq!(report.tables_analyzed, vec!["a", "c"]);
        assert_eq!(report.suggestions_for("b").count(), 0);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_allow_listed_table_missing_from_database_is_a_failure() {
        let h = harness(vec![FakeTable::new("orders")]);
        let analyzer = h
            .analyzer
            .with_config(AnalyzerConfig::new().with_tables(vec!["ordrs".into()]));

        let report = analyzer.analyze_tables().await;

        assert_eq!(report.outcome, AnalysisOutcome::Partial { failed_tables: 1 });
        assert_eq!(report.failures[0].table, "ordrs");
        assert!(report.failures[0].error.contains("not found"));
        assert!(report.tables_analyzed.is_empty());
        assert!(report.suggestions.is_empty());
    }
}

mod report_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::SeverityLevel;

    fn suggestion(table: &str, kind: SuggestionType, severity: SeverityLevel) -> Suggestion {
        Suggestion::new(table, kind, severity, format!("{} text", table))
    }

    #[test]
    fn test_grouped_by_table_in_first_seen_order() {
        let report = AnalysisReport::new(
            vec!["b".into(), "a".into()],
            vec![
                suggestion("b", SuggestionType::MissingIndex, SeverityLevel::Warning),
                suggestion("a", SuggestionType::Partitioning, SeverityLevel::Info),
                suggestion("b", SuggestionType::MissingForeignKeys, SeverityLevel::Info),
            ],
            Vec::new(),
        );

        let groups = report.grouped_by_table();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "b");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "a");
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(AnalysisOutcome::Partial { failed_tables: 2 }).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["failed_tables"], 2);
    }
}
