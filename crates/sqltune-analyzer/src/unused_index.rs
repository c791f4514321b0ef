//! Unused-index detection from free-text table comments
//!
//! The engine exposes no structured usage statistics here, so indexes are
//! recognized by an `Unused` marker in the table status comment. Keep all
//! knowledge of the comment format in this module.

use serde::{Deserialize, Serialize};

/// Marker that flags a comment fragment as describing an unused index
pub const UNUSED_MARKER: &str = "Unused";

/// Index names reported unused for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedIndex {
    /// The retained comment fragments, joined
    pub index_name: String,
    /// Table owning the indexes
    pub table: String,
}

/// Extracts the unused-index entry from a table status comment.
///
/// The comment is split into comma-delimited fragments and the fragments
/// containing `Unused` are kept. A comment using `;` between records (e.g.
/// `"Unused, index_a; Active, index_b"`) is split on `;` instead so each
/// record stays whole. Returns `None` when nothing is marked unused.
pub fn parse_unused_indexes(comment: &str, table: &str) -> Option<UnusedIndex> {
    let (separator, joiner) = if comment.contains(';') {
        (';', "; ")
    } else {
        (',', ", ")
    };

    let fragments: Vec<&str> = comment
        .split(separator)
        .map(str::trim)
        .filter(|fragment| fragment.contains(UNUSED_MARKER))
        .collect();

    if fragments.is_empty() {
        return None;
    }

    Some(UnusedIndex {
        index_name: fragments.join(joiner),
        table: table.to_string(),
    })
}
