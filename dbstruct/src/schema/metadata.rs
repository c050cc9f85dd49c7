//! Metadata structures for an introspected schema

use std::collections::BTreeMap;

/// Columns grouped by table, keyed and iterated in table-name order
pub type TableSchema = BTreeMap<String, Vec<ColumnMetadata>>;

/// Metadata for a column, one row of `information_schema.COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Data type as reported by the database (e.g., "bigint", "varchar")
    pub data_type: String,

    /// Whether the column is nullable (informational only)
    pub nullable: bool,

    /// Table the column belongs to
    pub table_name: String,

    /// Column comment, empty when there is none
    pub comment: String,
}

impl ColumnMetadata {
    pub fn new(
        table_name: impl Into<String>,
        name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: false,
            table_name: table_name.into(),
            comment: String::new(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Check if the column carries a non-blank comment
    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}
