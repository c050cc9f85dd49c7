//! Schema reader: fetches column metadata and groups it by table

use async_trait::async_trait;
use tracing::{debug, warn};

use super::metadata::{ColumnMetadata, TableSchema};
use crate::error::Result;

/// Source of column metadata.
///
/// Implementations return every column of the current schema, restricted to
/// `tables` when it is non-empty, ordered by table name and then by column
/// position.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch column rows, optionally filtered by table name.
    async fn fetch_columns(&self, tables: &[String]) -> Result<Vec<ColumnMetadata>>;
}

#[async_trait]
impl<S: SchemaSource + ?Sized> SchemaSource for &S {
    async fn fetch_columns(&self, tables: &[String]) -> Result<Vec<ColumnMetadata>> {
        (**self).fetch_columns(tables).await
    }
}

/// An in-memory schema source.
///
/// Useful for tests and for generating from metadata obtained elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaSource {
    columns: Vec<ColumnMetadata>,
}

impl StaticSchemaSource {
    pub fn new(columns: Vec<ColumnMetadata>) -> Self {
        Self { columns }
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn fetch_columns(&self, tables: &[String]) -> Result<Vec<ColumnMetadata>> {
        Ok(self
            .columns
            .iter()
            .filter(|c| tables.is_empty() || tables.contains(&c.table_name))
            .cloned()
            .collect())
    }
}

/// Fetch columns from `source` and group them by table.
///
/// Tables come back sorted by name; columns keep the order the source
/// returned them in. Requested tables that do not exist are logged and
/// skipped.
pub async fn fetch_schema<S: SchemaSource + ?Sized>(
    source: &S,
    tables: &[String],
) -> Result<TableSchema> {
    let rows = source.fetch_columns(tables).await?;
    debug!("Fetched {} column rows", rows.len());

    let schema = group_by_table(rows);

    for requested in tables {
        if !schema.contains_key(requested) {
            warn!("Table `{}` was requested but not found in the schema", requested);
        }
    }

    Ok(schema)
}

/// Group column rows by their owning table
pub fn group_by_table(rows: Vec<ColumnMetadata>) -> TableSchema {
    let mut schema = TableSchema::new();
    for column in rows {
        schema
            .entry(column.table_name.clone())
            .or_default()
            .push(column);
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::new("users", "id", "bigint"),
            ColumnMetadata::new("orders", "id", "bigint"),
            ColumnMetadata::new("users", "name", "varchar"),
            ColumnMetadata::new("orders", "total", "decimal"),
            ColumnMetadata::new("audit_log", "at", "datetime"),
        ]
    }

    #[test]
    fn test_group_by_table_sorts_tables_and_keeps_column_order() {
        let schema = group_by_table(sample_columns());
        let tables: Vec<&str> = schema.keys().map(|k| k.as_str()).collect();
        assert_eq!(tables, vec!["audit_log", "orders", "users"]);

        let users: Vec<&str> = schema["users"].iter().map(|c| c.name.as_str()).collect();
        assert_eq!(users, vec!["id", "name"]);
    }

    #[tokio::test]
    async fn test_fetch_schema_without_filter() {
        let source = StaticSchemaSource::new(sample_columns());
        let schema = fetch_schema(&source, &[]).await.unwrap();
        assert_eq!(schema.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_schema_filter_matches_allow_list() {
        let source = StaticSchemaSource::new(sample_columns());
        let wanted = vec!["users".to_string(), "orders".to_string()];
        let schema = fetch_schema(&source, &wanted).await.unwrap();

        let mut keys: Vec<String> = schema.keys().cloned().collect();
        let mut expected = wanted.clone();
        keys.sort();
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    async fn test_fetch_schema_skips_missing_tables() {
        let source = StaticSchemaSource::new(sample_columns());
        let wanted = vec!["users".to_string(), "ghost".to_string()];
        let schema = fetch_schema(&source, &wanted).await.unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["users"]);
    }
}
