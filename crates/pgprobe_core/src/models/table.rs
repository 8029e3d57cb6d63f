//! Per-run table summaries derived from the catalog.

/// One user table discovered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Schema the table lives in
    pub schema: String,
    /// Table name
    pub name: String,
}

/// A table with its row count, or the reason the count was unavailable.
///
/// Derived per run; never persisted.
#[derive(Debug, Clone)]
pub struct TableSummary {
    /// Schema the table lives in
    pub schema: String,
    /// Table name
    pub name: String,
    /// Row count, `None` when the count query failed
    pub row_count: Option<i64>,
    /// Underlying message when the count query failed
    pub error: Option<String>,
}

impl TableSummary {
    /// Summary for a table whose count query succeeded.
    pub fn counted(table: &TableEntry, rows: i64) -> Self {
        Self {
            schema: table.schema.clone(),
            name: table.name.clone(),
            row_count: Some(rows),
            error: None,
        }
    }

    /// Summary for a table whose count query failed.
    pub fn unavailable(table: &TableEntry, message: impl Into<String>) -> Self {
        Self {
            schema: table.schema.clone(),
            name: table.name.clone(),
            row_count: None,
            error: Some(message.into()),
        }
    }

    /// Check if a row count is available.
    pub fn is_counted(&self) -> bool {
        self.row_count.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> TableEntry {
        TableEntry { schema: "public".to_string(), name: "categories".to_string() }
    }

    #[test]
    fn counted_summary_carries_the_row_count() {
        let summary = TableSummary::counted(&entry(), 42);
        assert!(summary.is_counted());
        assert_eq!(summary.row_count, Some(42));
        assert!(summary.error.is_none());
    }

    #[test]
    fn unavailable_summary_carries_the_failure_message() {
        let summary = TableSummary::unavailable(&entry(), "relation is corrupt");
        assert!(!summary.is_counted());
        assert_eq!(summary.row_count, None);
        assert_eq!(summary.error.as_deref(), Some("relation is corrupt"));
    }
}
