// Copyright 2025 Cowboy AI, LLC.

//! Generic CRUD repositories over an injected executor
//!
//! A repository composes the mapper, the statement builder and the executor
//! collaborator. Its only internal state is the immutably cached key schema
//! and mapper, built once at construction, so concurrent calls against one
//! instance are safe without locking. Saves are unconditional upserts keyed
//! by the full composite key: concurrent saves of the same key race at the
//! store with last-write-wins semantics.

use crate::errors::{StoreError, StoreResult};
use crate::executor::{script_statements, StatementExecutor};
use crate::mapper::EntityMapper;
use crate::naming::NamingConfig;
use crate::record::StoreRecord;
use crate::schema::KeySchema;
use crate::statement::StatementBuilder;
use crate::value::Value;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// Repository operations for one record type
///
/// Point operations take the full composite key as a positional value slice,
/// in declared order: partition fields first, then clustering fields.
#[async_trait]
pub trait Repository<T: StoreRecord>: Send + Sync {
    /// Find the single record with this composite key
    ///
    /// Zero matching rows is not an error: the result is `None`.
    async fn find(&self, key: &[Value]) -> StoreResult<Option<T>>;

    /// Fetch every record in the table
    ///
    /// Result ordering is store-defined; callers must not depend on a global
    /// order across partitions.
    async fn find_all(&self) -> StoreResult<Vec<T>>;

    /// Fetch every record whose partition-key fields equal these values
    async fn find_by_partition(&self, partition: &[Value]) -> StoreResult<Vec<T>>;

    /// Upsert a record, returning it unchanged as acknowledgment
    async fn save(&self, record: T) -> StoreResult<T>;

    /// Delete the record with this composite key; absent keys are a no-op
    async fn delete(&self, key: &[Value]) -> StoreResult<()>;

    /// Check whether a record with this composite key exists
    async fn exists(&self, key: &[Value]) -> StoreResult<bool> {
        Ok(self.find(key).await?.is_some())
    }
}

/// Configuration for a table repository
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfig {
    /// Table-name override; defaults to the name derived from the record type
    pub table: Option<String>,
    /// Naming conventions used to resolve column names
    pub naming: NamingConfig,
}

/// Repository for one record type over one table
pub struct TableRepository<T: StoreRecord> {
    executor: Arc<dyn StatementExecutor>,
    schema: Arc<KeySchema>,
    mapper: EntityMapper<T>,
    statements: StatementBuilder,
}

impl<T: StoreRecord> std::fmt::Debug for TableRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRepository")
            .field("schema", &self.schema)
            .field("statements", &self.statements)
            .finish_non_exhaustive()
    }
}

impl<T: StoreRecord> TableRepository<T> {
    /// Create a repository with default configuration
    pub fn new(executor: Arc<dyn StatementExecutor>) -> StoreResult<Self> {
        Self::with_config(executor, RepositoryConfig::default())
    }

    /// Create a repository with explicit configuration
    ///
    /// The key schema descriptor is built and validated here, so schema and
    /// configuration mistakes surface at construction, never at call time.
    pub fn with_config(
        executor: Arc<dyn StatementExecutor>,
        config: RepositoryConfig,
    ) -> StoreResult<Self> {
        let mut metadata = T::metadata();
        if config.table.is_some() {
            metadata.table = config.table;
        }

        let schema = Arc::new(KeySchema::describe(&metadata, &config.naming)?);
        info!(
            "repository initialized for {} on table {}",
            schema.type_name(),
            schema.table()
        );

        Ok(Self {
            executor,
            mapper: EntityMapper::new(Arc::clone(&schema)),
            statements: StatementBuilder::new(Arc::clone(&schema)),
            schema,
        })
    }

    /// The descriptor this repository was built with
    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    /// Run a DDL setup script through the executor, one time, before use
    ///
    /// The script is split into statements in file order, trimmed of
    /// surrounding whitespace, with blank entries dropped.
    pub async fn run_setup_script(&self, script: &str) -> StoreResult<()> {
        self.executor
            .run_setup_script(&script_statements(script))
            .await
    }
}

#[async_trait]
impl<T: StoreRecord> Repository<T> for TableRepository<T> {
    async fn find(&self, key: &[Value]) -> StoreResult<Option<T>> {
        let clauses = self.mapper.encode_key_tuple(key)?;
        debug!("find on {} by full key", self.schema.table());

        let rows = self
            .executor
            .execute(&self.statements.select_by_key(clauses))
            .await?;
        match rows.first() {
            Some(row) => Ok(Some(self.mapper.decode(row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> StoreResult<Vec<T>> {
        debug!("scan of {}", self.schema.table());
        let rows = self.executor.execute(&self.statements.select_all()).await?;
        rows.iter().map(|row| self.mapper.decode(row)).collect()
    }

    async fn find_by_partition(&self, partition: &[Value]) -> StoreResult<Vec<T>> {
        let statement = self.statements.select_by_partition(partition)?;
        debug!("partition scan of {}", self.schema.table());

        let rows = self.executor.execute(&statement).await?;
        rows.iter().map(|row| self.mapper.decode(row)).collect()
    }

    async fn save(&self, record: T) -> StoreResult<T> {
        let row = self.mapper.encode(&record)?;
        debug!("upsert into {}", self.schema.table());

        self.executor
            .execute(&self.statements.upsert(row))
            .await?;
        Ok(record)
    }

    async fn delete(&self, key: &[Value]) -> StoreResult<()> {
        let clauses = self.mapper.encode_key_tuple(key)?;
        debug!("point delete on {}", self.schema.table());

        self.executor
            .execute(&self.statements.point_delete(clauses))
            .await?;
        Ok(())
    }
}

/// Builder for [`TableRepository`]
pub struct TableRepositoryBuilder<T: StoreRecord> {
    executor: Option<Arc<dyn StatementExecutor>>,
    config: RepositoryConfig,
    _record: PhantomData<fn() -> T>,
}

impl<T: StoreRecord> TableRepositoryBuilder<T> {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            executor: None,
            config: RepositoryConfig::default(),
            _record: PhantomData,
        }
    }

    /// Set the executor collaborator
    pub fn executor(mut self, executor: Arc<dyn StatementExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Override the table name
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.config.table = Some(table.into());
        self
    }

    /// Set the naming configuration
    pub fn naming(mut self, naming: NamingConfig) -> Self {
        self.config.naming = naming;
        self
    }

    /// Build the repository
    pub fn build(self) -> StoreResult<TableRepository<T>> {
        let executor = self.executor.ok_or_else(|| {
            StoreError::configuration("executor not provided".to_string())
        })?;
        TableRepository::with_config(executor, self.config)
    }
}

impl<T: StoreRecord> Default for TableRepositoryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
