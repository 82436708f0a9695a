//! Service context shared by all handlers
//!
//! Constructed once at startup and cloned into every request via axum
//! `State`. Holds the dispatcher (worker pool + persister), the processed
//! counter and the start instant used for uptime.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::pipeline::{Dispatcher, WorkerPool};
use crate::store::Persister;

/// Process-wide throughput counters
///
/// Uses RwLock for concurrent reads from the stats endpoint with one writer
/// per completed batch.
#[derive(Debug, Default)]
pub struct Counters {
    processed: RwLock<i64>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` processed samples (exclusive lock)
    pub async fn add_processed(&self, n: i64) {
        *self.processed.write().await += n;
    }

    /// Total processed samples so far (shared lock)
    pub async fn processed(&self) -> i64 {
        *self.processed.read().await
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Dispatcher,
    pub counters: Arc<Counters>,
    started_at: Instant,
}

impl AppState {
    /// Build the service context from configuration and a persister
    pub fn new(config: Config, persister: Persister) -> Self {
        let pool = Arc::new(WorkerPool::new(config.max_workers));
        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(pool, persister),
            counters: Arc::new(Counters::new()),
            started_at: Instant::now(),
        }
    }

    pub fn worker_pool(&self) -> &Arc<WorkerPool> {
        self.dispatcher.pool()
    }

    /// Time since this context was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_not_lost() {
        let counters = Arc::new(Counters::new());
        let mut handles = Vec::new();

        for i in 0..50 {
            let counters = Arc::clone(&counters);
            handles.push(tokio::spawn(async move {
                counters.add_processed(i).await;
                counters.processed().await
            }));
        }
        for handle in handles {
            let seen = handle.await.unwrap();
            assert!((0..=1225).contains(&seen));
        }

        assert_eq!(counters.processed().await, (0..50).sum::<i64>());
    }

    #[tokio::test]
    async fn test_app_state_pool_uses_configured_capacity() {
        let config = Config {
            max_workers: 7,
            ..Config::default()
        };
        let state = AppState::new(config, Persister::disabled());
        assert_eq!(state.worker_pool().capacity(), 7);
        assert_eq!(state.worker_pool().active(), 0);
    }
}
