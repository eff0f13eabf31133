// Copyright 2025 Cowboy AI, LLC.

//! In-memory statement executor
//!
//! A self-contained [`StatementExecutor`] over registered tables, honoring
//! the same row-identity semantics the repository relies on: upserts replace
//! the row with an equal composite key, point deletes are idempotent, and
//! selects filter by equality. Useful as the test double for repository
//! suites and as an embeddable backend for tools that do not need a cluster.

use crate::errors::{StoreError, StoreResult};
use crate::executor::StatementExecutor;
use crate::schema::KeySchema;
use crate::statement::{Clause, Statement};
use crate::value::{Row, Value};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct MemoryTable {
    key_columns: Vec<String>,
    rows: Vec<Row>,
}

impl MemoryTable {
    fn key_of(&self, row: &Row) -> Option<Vec<Value>> {
        self.key_columns
            .iter()
            .map(|column| row.get(column).cloned())
            .collect()
    }

    fn matches(row: &Row, clauses: &[Clause]) -> bool {
        clauses
            .iter()
            .all(|clause| row.get(&clause.column) == Some(&clause.value))
    }
}

/// In-memory executor over registered tables
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    tables: RwLock<HashMap<String, MemoryTable>>,
    setup_statements: RwLock<Vec<String>>,
}

impl MemoryExecutor {
    /// Create an executor with no registered tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with its composite-key column names
    pub async fn register_table(
        &self,
        table: impl Into<String>,
        key_columns: Vec<String>,
    ) {
        let table = table.into();
        debug!("registering in-memory table {} with key {:?}", table, key_columns);
        self.tables.write().await.insert(
            table,
            MemoryTable {
                key_columns,
                rows: Vec::new(),
            },
        );
    }

    /// Register the table described by a key schema
    pub async fn register_schema(&self, schema: &KeySchema) {
        self.register_table(schema.table(), schema.key_column_names())
            .await;
    }

    /// Number of rows currently held by a table
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    /// Setup statements recorded by [`StatementExecutor::run_setup_script`]
    pub async fn setup_statements(&self) -> Vec<String> {
        self.setup_statements.read().await.clone()
    }

    fn unknown_table(table: &str) -> StoreError {
        StoreError::transport(format!("table {table} is not registered"))
    }
}

#[async_trait]
impl StatementExecutor for MemoryExecutor {
    async fn execute(&self, statement: &Statement) -> StoreResult<Vec<Row>> {
        let mut tables = self.tables.write().await;

        match statement {
            Statement::SelectAll { table } => {
                let table = tables
                    .get(table.as_str())
                    .ok_or_else(|| Self::unknown_table(table))?;
                Ok(table.rows.clone())
            }
            Statement::Select { table, clauses } => {
                let table = tables
                    .get(table.as_str())
                    .ok_or_else(|| Self::unknown_table(table))?;
                Ok(table
                    .rows
                    .iter()
                    .filter(|row| MemoryTable::matches(row, clauses))
                    .cloned()
                    .collect())
            }
            Statement::Upsert { table, columns } => {
                let table_entry = tables
                    .get_mut(table.as_str())
                    .ok_or_else(|| Self::unknown_table(table))?;
                let key = table_entry.key_of(columns).ok_or_else(|| {
                    StoreError::transport(format!(
                        "upsert into {table} omits a key column"
                    ))
                })?;

                let key_columns = table_entry.key_columns.clone();
                let existing = table_entry
                    .rows
                    .iter_mut()
                    .find(|row| key_equals(&key_columns, row, &key));
                match existing {
                    Some(row) => *row = columns.clone(),
                    None => table_entry.rows.push(columns.clone()),
                }
                Ok(Vec::new())
            }
            Statement::Delete { table, key } => {
                let table_entry = tables
                    .get_mut(table.as_str())
                    .ok_or_else(|| Self::unknown_table(table))?;
                // Absent keys are a no-op
                table_entry
                    .rows
                    .retain(|row| !MemoryTable::matches(row, key));
                Ok(Vec::new())
            }
        }
    }

    async fn run_setup_script(&self, statements: &[String]) -> StoreResult<()> {
        let mut recorded = self.setup_statements.write().await;
        for statement in statements {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                continue;
            }
            recorded.push(trimmed.to_string());
        }
        Ok(())
    }
}

fn key_equals(key_columns: &[String], row: &Row, key: &[Value]) -> bool {
    key_columns
        .iter()
        .zip(key)
        .all(|(column, value)| row.get(column) == Some(value))
}
