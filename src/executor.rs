// Copyright 2025 Cowboy AI, LLC.

//! The executor collaborator interface
//!
//! Everything network-shaped lives behind this seam: connection pooling,
//! request multiplexing, statement rendering and wire encoding belong to the
//! implementation, not to this core. The repository passes statement
//! descriptions through and decodes whatever rows come back; cancellation
//! and timeout policy are the executor's contract.

use crate::errors::StoreResult;
use crate::statement::Statement;
use crate::value::Row;
use async_trait::async_trait;

/// Executes statement descriptions against the underlying store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute one statement and return the resulting rows
    ///
    /// Writes and deletes return an empty row set. Transport failures are
    /// reported as [`crate::StoreError::Transport`] and are propagated by the
    /// repository unchanged, never retried.
    async fn execute(&self, statement: &Statement) -> StoreResult<Vec<Row>>;

    /// One-time schema setup hook, run before the first repository use
    ///
    /// Statements are executed in the given order; implementations trim each
    /// statement of surrounding whitespace and skip blank entries.
    async fn run_setup_script(&self, statements: &[String]) -> StoreResult<()>;
}

/// Split a DDL script into statements, in file order
///
/// Statements are separated by semicolons; each is trimmed of surrounding
/// whitespace and blank entries are dropped.
pub fn script_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(String::from)
        .collect()
}
