//! Metrics collection for repository operations

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Metrics for repository operations
///
/// Cheap to clone; all clones share the same collectors.
#[derive(Debug, Clone, Default)]
pub struct RepositoryMetrics {
    counters: Arc<RwLock<HashMap<String, u64>>>,
    durations: Arc<RwLock<HashMap<String, Vec<Duration>>>>,
    errors: Arc<RwLock<HashMap<String, u64>>>,
}

impl RepositoryMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a counter
    pub async fn increment(&self, name: &str) {
        let mut counters = self.counters.write().await;
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Record an error for an operation
    pub async fn record_error(&self, operation: &str) {
        let mut errors = self.errors.write().await;
        *errors.entry(operation.to_string()).or_insert(0) += 1;
    }

    /// Record an operation duration
    pub async fn record_duration(&self, operation: &str, duration: Duration) {
        let mut durations = self.durations.write().await;
        let samples = durations.entry(operation.to_string()).or_default();
        samples.push(duration);

        // Keep only the last 1000 measurements per operation
        if samples.len() > 1000 {
            let excess = samples.len() - 1000;
            samples.drain(0..excess);
        }
    }

    /// Get a counter value
    pub async fn get_counter(&self, name: &str) -> u64 {
        self.counters.read().await.get(name).copied().unwrap_or(0)
    }

    /// Get an error count
    pub async fn get_error_count(&self, operation: &str) -> u64 {
        self.errors.read().await.get(operation).copied().unwrap_or(0)
    }

    /// Get the average duration of an operation
    pub async fn get_avg_duration(&self, operation: &str) -> Option<Duration> {
        let durations = self.durations.read().await;
        let samples = durations.get(operation)?;
        if samples.is_empty() {
            return None;
        }
        let sum: Duration = samples.iter().sum();
        Some(sum / samples.len() as u32)
    }

    /// Get all metrics as a summary
    pub async fn summary(&self) -> MetricsSummary {
        let counters = self.counters.read().await.clone();
        let errors = self.errors.read().await.clone();

        let mut duration_stats = HashMap::new();
        let durations = self.durations.read().await;
        for (operation, samples) in durations.iter() {
            if samples.is_empty() {
                continue;
            }
            let sum: Duration = samples.iter().sum();
            duration_stats.insert(
                operation.clone(),
                DurationStats {
                    count: samples.len(),
                    avg: sum / samples.len() as u32,
                    min: *samples.iter().min().unwrap(),
                    max: *samples.iter().max().unwrap(),
                },
            );
        }

        MetricsSummary {
            counters,
            errors,
            durations: duration_stats,
        }
    }

    /// Reset all metrics
    pub async fn reset(&self) {
        self.counters.write().await.clear();
        self.durations.write().await.clear();
        self.errors.write().await.clear();
    }

    /// Create a timer for an operation
    pub fn timer(&self, operation: &str) -> MetricsTimer<'_> {
        MetricsTimer::new(self, operation)
    }
}

/// Summary of all metrics
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    /// Counter values
    pub counters: HashMap<String, u64>,
    /// Error counts
    pub errors: HashMap<String, u64>,
    /// Duration statistics per operation
    pub durations: HashMap<String, DurationStats>,
}

/// Duration statistics for an operation
#[derive(Debug, Clone)]
pub struct DurationStats {
    /// Number of measurements
    pub count: usize,
    /// Average duration
    pub avg: Duration,
    /// Minimum duration
    pub min: Duration,
    /// Maximum duration
    pub max: Duration,
}

/// Timer for measuring an operation's duration
pub struct MetricsTimer<'a> {
    metrics: &'a RepositoryMetrics,
    operation: String,
    start: Instant,
}

impl<'a> MetricsTimer<'a> {
    /// Create a new timer
    pub fn new(metrics: &'a RepositoryMetrics, operation: &str) -> Self {
        Self {
            metrics,
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    /// Record the duration and increment the operation counter
    pub async fn record(self) {
        let duration = self.start.elapsed();
        self.metrics
            .record_duration(&self.operation, duration)
            .await;
        self.metrics
            .increment(&format!("{}.count", self.operation))
            .await;
    }

    /// Record the duration as an error
    pub async fn record_error(self) {
        let duration = self.start.elapsed();
        self.metrics
            .record_duration(&self.operation, duration)
            .await;
        self.metrics.record_error(&self.operation).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counters() {
        let metrics = RepositoryMetrics::new();

        metrics.increment("test.counter").await;
        metrics.increment("test.counter").await;

        assert_eq!(metrics.get_counter("test.counter").await, 2);
        assert_eq!(metrics.get_counter("nonexistent").await, 0);
    }

    #[tokio::test]
    async fn test_errors() {
        let metrics = RepositoryMetrics::new();

        metrics.record_error("save").await;
        metrics.record_error("save").await;
        metrics.record_error("find").await;

        assert_eq!(metrics.get_error_count("save").await, 2);
        assert_eq!(metrics.get_error_count("find").await, 1);
    }

    #[tokio::test]
    async fn test_durations() {
        let metrics = RepositoryMetrics::new();

        metrics.record_duration("op", Duration::from_millis(10)).await;
        metrics.record_duration("op", Duration::from_millis(20)).await;
        metrics.record_duration("op", Duration::from_millis(30)).await;

        let avg = metrics.get_avg_duration("op").await.unwrap();
        assert_eq!(avg, Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_timer() {
        let metrics = RepositoryMetrics::new();

        {
            let timer = metrics.timer("test.operation");
            tokio::time::sleep(Duration::from_millis(10)).await;
            timer.record().await;
        }

        assert_eq!(metrics.get_counter("test.operation.count").await, 1);
        assert!(
            metrics.get_avg_duration("test.operation").await.unwrap()
                >= Duration::from_millis(10)
        );
    }

    #[tokio::test]
    async fn test_summary_and_reset() {
        let metrics = RepositoryMetrics::new();

        metrics.increment("saves").await;
        metrics.record_error("find").await;
        metrics.record_duration("save", Duration::from_millis(5)).await;
        metrics.record_duration("save", Duration::from_millis(15)).await;

        let summary = metrics.summary().await;
        assert_eq!(summary.counters.get("saves"), Some(&1));
        assert_eq!(summary.errors.get("find"), Some(&1));

        let stats = summary.durations.get("save").unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg, Duration::from_millis(10));
        assert_eq!(stats.min, Duration::from_millis(5));
        assert_eq!(stats.max, Duration::from_millis(15));

        metrics.reset().await;
        assert_eq!(metrics.get_counter("saves").await, 0);
    }
}
