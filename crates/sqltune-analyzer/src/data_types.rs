//! Column data-type downgrade recommendations

use crate::{ColumnDataType, SeverityLevel, Suggestion, SuggestionType};

/// Declared type → narrower or cheaper replacement.
///
/// Keys are lower case; lookups normalize the declared type first.
pub const DATA_TYPE_DOWNGRADES: &[(&str, &str)] = &[
    ("bigint", "int"),
    ("int", "smallint"),
    ("integer", "smallint"),
    ("mediumint", "smallint"),
    ("double", "decimal"),
    ("float", "decimal"),
    ("real", "decimal"),
    ("longtext", "text"),
    ("mediumtext", "text"),
    ("text", "varchar"),
    ("longblob", "blob"),
    ("mediumblob", "blob"),
    ("datetime", "timestamp"),
];

/// Looks up the recommended type for a declared type.
///
/// Returns `None` when the type is not mapped or is already the recommended
/// one.
pub fn recommended_type(declared: &str) -> Option<&'static str> {
    let normalized = declared.trim().to_lowercase();
    DATA_TYPE_DOWNGRADES
        .iter()
        .find(|(from, _)| *from == normalized)
        .map(|(_, to)| *to)
        .filter(|to| *to != normalized)
}

/// One suggestion per column whose declared type has a cheaper mapping,
/// in column order.
pub fn data_type_optimizations(table: &str, columns: &[ColumnDataType]) -> Vec<Suggestion> {
    columns
        .iter()
        .filter_map(|column| {
            let current = column.data_type.trim().to_lowercase();
            let recommended = recommended_type(&current)?;
            Some(
                Suggestion::new(
                    table,
                    SuggestionType::DataType,
                    SeverityLevel::Info,
                    format!(
                        "Column '{}' is declared as '{}'. Consider using '{}' instead.",
                        column.column, current, recommended
                    ),
                )
                .with_columns(vec![column.column.clone()]),
            )
        })
        .collect()
}
