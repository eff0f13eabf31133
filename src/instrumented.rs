// Copyright 2025 Cowboy AI, LLC.

//! Instrumented repository wrapper that adds metrics collection

use crate::errors::StoreResult;
use crate::metrics::RepositoryMetrics;
use crate::record::StoreRecord;
use crate::repository::Repository;
use crate::value::Value;
use async_trait::async_trait;
use std::marker::PhantomData;

/// Repository decorator that records per-operation metrics
pub struct InstrumentedRepository<T, R>
where
    T: StoreRecord,
    R: Repository<T>,
{
    inner: R,
    metrics: RepositoryMetrics,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> InstrumentedRepository<T, R>
where
    T: StoreRecord,
    R: Repository<T>,
{
    /// Create a new instrumented repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            metrics: RepositoryMetrics::new(),
            _record: PhantomData,
        }
    }

    /// Create with an existing metrics collector
    pub fn with_metrics(inner: R, metrics: RepositoryMetrics) -> Self {
        Self {
            inner,
            metrics,
            _record: PhantomData,
        }
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> &RepositoryMetrics {
        &self.metrics
    }

    /// Get the inner repository
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<T, R> Repository<T> for InstrumentedRepository<T, R>
where
    T: StoreRecord,
    R: Repository<T>,
{
    async fn find(&self, key: &[Value]) -> StoreResult<Option<T>> {
        let timer = self.metrics.timer("repository.find");

        match self.inner.find(key).await {
            Ok(Some(record)) => {
                timer.record().await;
                self.metrics.increment("repository.find.hit").await;
                Ok(Some(record))
            }
            Ok(None) => {
                timer.record().await;
                self.metrics.increment("repository.find.miss").await;
                Ok(None)
            }
            Err(e) => {
                timer.record_error().await;
                self.metrics.increment("repository.find.error").await;
                Err(e)
            }
        }
    }

    async fn find_all(&self) -> StoreResult<Vec<T>> {
        let timer = self.metrics.timer("repository.find_all");

        match self.inner.find_all().await {
            Ok(records) => {
                timer.record().await;
                Ok(records)
            }
            Err(e) => {
                timer.record_error().await;
                self.metrics.increment("repository.find_all.error").await;
                Err(e)
            }
        }
    }

    async fn find_by_partition(&self, partition: &[Value]) -> StoreResult<Vec<T>> {
        let timer = self.metrics.timer("repository.find_by_partition");

        match self.inner.find_by_partition(partition).await {
            Ok(records) => {
                timer.record().await;
                Ok(records)
            }
            Err(e) => {
                timer.record_error().await;
                self.metrics
                    .increment("repository.find_by_partition.error")
                    .await;
                Err(e)
            }
        }
    }

    async fn save(&self, record: T) -> StoreResult<T> {
        let timer = self.metrics.timer("repository.save");

        match self.inner.save(record).await {
            Ok(record) => {
                timer.record().await;
                self.metrics.increment("repository.save.success").await;
                Ok(record)
            }
            Err(e) => {
                timer.record_error().await;
                self.metrics.increment("repository.save.error").await;
                Err(e)
            }
        }
    }

    async fn delete(&self, key: &[Value]) -> StoreResult<()> {
        let timer = self.metrics.timer("repository.delete");

        match self.inner.delete(key).await {
            Ok(()) => {
                timer.record().await;
                Ok(())
            }
            Err(e) => {
                timer.record_error().await;
                self.metrics.increment("repository.delete.error").await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreResult;
    use crate::memory::MemoryExecutor;
    use crate::record::FieldValues;
    use crate::repository::TableRepository;
    use crate::schema::{FieldDef, RecordMetadata};
    use crate::value::ValueKind;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Setting {
        name: String,
        enabled: bool,
    }

    impl StoreRecord for Setting {
        fn metadata() -> RecordMetadata {
            RecordMetadata::new(
                "Setting",
                vec![
                    FieldDef::partition("name", ValueKind::Text),
                    FieldDef::regular("enabled", ValueKind::Boolean),
                ],
            )
        }

        fn field_value(&self, identifier: &str) -> Option<Value> {
            match identifier {
                "name" => Some(Value::text(self.name.clone())),
                "enabled" => Some(Value::Boolean(self.enabled)),
                _ => None,
            }
        }

        fn from_fields(fields: &FieldValues) -> StoreResult<Self> {
            Ok(Self {
                name: fields.text("name")?,
                enabled: fields.boolean("enabled")?,
            })
        }
    }

    async fn instrumented() -> InstrumentedRepository<Setting, TableRepository<Setting>> {
        let executor = Arc::new(MemoryExecutor::new());
        executor
            .register_table("setting", vec!["name".to_string()])
            .await;
        InstrumentedRepository::new(TableRepository::new(executor).unwrap())
    }

    #[tokio::test]
    async fn test_instrumented_save_counts_success() {
        let repo = instrumented().await;

        repo.save(Setting {
            name: "dark_mode".to_string(),
            enabled: true,
        })
        .await
        .unwrap();

        assert_eq!(repo.metrics().get_counter("repository.save.count").await, 1);
        assert_eq!(
            repo.metrics().get_counter("repository.save.success").await,
            1
        );
        assert_eq!(repo.metrics().get_counter("repository.save.error").await, 0);
    }

    #[tokio::test]
    async fn test_instrumented_find_counts_hit_and_miss() {
        let repo = instrumented().await;

        repo.save(Setting {
            name: "dark_mode".to_string(),
            enabled: true,
        })
        .await
        .unwrap();

        let hit = repo.find(&[Value::text("dark_mode")]).await.unwrap();
        assert!(hit.is_some());

        let miss = repo.find(&[Value::text("light_mode")]).await.unwrap();
        assert!(miss.is_none());

        assert_eq!(repo.metrics().get_counter("repository.find.count").await, 2);
        assert_eq!(repo.metrics().get_counter("repository.find.hit").await, 1);
        assert_eq!(repo.metrics().get_counter("repository.find.miss").await, 1);
    }

    #[tokio::test]
    async fn test_instrumented_validation_error_counts() {
        let repo = instrumented().await;

        // Wrong key arity: validation error from the mapper, counted as error
        let err = repo.find(&[]).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.metrics().get_counter("repository.find.error").await, 1);
        assert_eq!(repo.metrics().get_error_count("repository.find").await, 1);
    }
}
