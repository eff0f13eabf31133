// Copyright 2025 Cowboy AI, LLC.

//! Logical statement descriptions and their builder
//!
//! The builder assembles descriptions, not strings: each executor
//! collaborator renders a [`Statement`] to its own transport format. Four
//! shapes cover the repository: full-table scan, equality-predicate select,
//! upsert, and point delete. Upserts rely on the store's own row-identity
//! semantics (replace on equal composite key), so one shape serves inserts
//! and updates alike.

use crate::errors::{StoreError, StoreResult};
use crate::schema::KeySchema;
use crate::value::{Row, Value};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One equality predicate: column = value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Column name
    pub column: String,
    /// Value the column must equal
    pub value: Value,
}

impl Clause {
    /// Create an equality clause
    pub fn new(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// An immutable logical statement description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Scan every row of the table
    SelectAll {
        /// Target table
        table: String,
    },
    /// Select rows matching every equality clause
    Select {
        /// Target table
        table: String,
        /// Equality clauses, in declared key order
        clauses: Vec<Clause>,
    },
    /// Write all column values; replaces any row with the same composite key
    Upsert {
        /// Target table
        table: String,
        /// Column values, key columns first
        columns: Row,
    },
    /// Delete the single row whose composite key equals the clauses
    Delete {
        /// Target table
        table: String,
        /// Full composite key as equality clauses
        key: Vec<Clause>,
    },
}

impl Statement {
    /// The table this statement targets
    pub fn table(&self) -> &str {
        match self {
            Statement::SelectAll { table }
            | Statement::Select { table, .. }
            | Statement::Upsert { table, .. }
            | Statement::Delete { table, .. } => table,
        }
    }
}

/// Assembles statement descriptions for one table and key schema
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    schema: Arc<KeySchema>,
}

impl StatementBuilder {
    /// Create a builder bound to a key schema
    pub fn new(schema: Arc<KeySchema>) -> Self {
        Self { schema }
    }

    /// Scan every row of the table
    pub fn select_all(&self) -> Statement {
        Statement::SelectAll {
            table: self.schema.table().to_string(),
        }
    }

    /// Select by equality over exactly the partition-key columns
    ///
    /// Fails with a validation error when the number of values differs from
    /// the partition-key arity or a value is null.
    pub fn select_by_partition(&self, partition: &[Value]) -> StoreResult<Statement> {
        let fields = self.schema.partition_fields();
        if partition.len() != fields.len() {
            return Err(StoreError::validation(format!(
                "{}: expected {} partition-key values, got {}",
                self.schema.type_name(),
                fields.len(),
                partition.len()
            )));
        }

        let mut clauses = Vec::with_capacity(fields.len());
        for (spec, value) in fields.iter().zip(partition) {
            if value.is_null() {
                return Err(StoreError::validation(format!(
                    "{}: partition-key field {} must not be null",
                    self.schema.type_name(),
                    spec.identifier
                )));
            }
            if !value.conforms_to(spec.kind) {
                return Err(StoreError::validation(format!(
                    "{}: partition-key field {} expects {:?}, got {}",
                    self.schema.type_name(),
                    spec.identifier,
                    spec.kind,
                    value.type_name()
                )));
            }
            clauses.push(Clause::new(spec.column.clone(), value.clone()));
        }

        Ok(Statement::Select {
            table: self.schema.table().to_string(),
            clauses,
        })
    }

    /// Point select by a fully encoded composite key
    pub fn select_by_key(&self, key: Vec<Clause>) -> Statement {
        Statement::Select {
            table: self.schema.table().to_string(),
            clauses: key,
        }
    }

    /// Upsert a fully encoded row
    pub fn upsert(&self, columns: Row) -> Statement {
        Statement::Upsert {
            table: self.schema.table().to_string(),
            columns,
        }
    }

    /// Delete the row addressed by a fully encoded composite key
    pub fn point_delete(&self, key: Vec<Clause>) -> Statement {
        Statement::Delete {
            table: self.schema.table().to_string(),
            key,
        }
    }
}
