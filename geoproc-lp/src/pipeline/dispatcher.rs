//! Bounded concurrent dispatch of batch chunks
//!
//! [`WorkerPool`] is a fixed-capacity set of interchangeable tokens backed by
//! a tokio [`Semaphore`]. [`Dispatcher::dispatch`] acquires one token per
//! chunk *before* spawning that chunk's task, so an exhausted pool holds back
//! the spawning loop. The token is an owned permit moved into the task and
//! released when the task ends, however it ends (completion, panic, abort).
//!
//! Chunk tasks run samples sequentially (transform, then best-effort
//! persist) and push one [`ProcessedResult`] per sample into a fan-in channel
//! sized to the batch, so a send never waits on the collector.

use std::sync::Arc;

use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error};

use super::partition::ChunkPlan;
use super::transform::transform;
use crate::error::{Error, Result};
use crate::models::{ProcessedResult, Sample};
use crate::store::Persister;

/// Fixed-capacity pool of chunk execution tokens
#[derive(Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Maximum number of chunks that may run at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tokens currently held by running chunks, in `0..=capacity`
    pub fn active(&self) -> usize {
        self.capacity
            .saturating_sub(self.permits.available_permits())
    }

    /// Wait for a free token.
    ///
    /// # Errors
    ///
    /// [`Error::ServiceShutdown`] once the pool has been closed.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| Error::ServiceShutdown)
    }

    /// Refuse all future acquisitions. Tokens already held stay valid.
    pub fn close(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

/// Runs batches across the worker pool
#[derive(Debug, Clone)]
pub struct Dispatcher {
    pool: Arc<WorkerPool>,
    persister: Persister,
}

impl Dispatcher {
    pub fn new(pool: Arc<WorkerPool>, persister: Persister) -> Self {
        Self { pool, persister }
    }

    pub fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    pub fn persister(&self) -> &Persister {
        &self.persister
    }

    /// Process every sample of `samples` according to `plan`.
    ///
    /// Returns exactly one result per sample, in no particular order. Blocks
    /// until every chunk task has finished and the result channel is drained.
    ///
    /// # Errors
    ///
    /// [`Error::ServiceShutdown`] if the pool is closed before all chunks
    /// could be started. Chunks already running are aborted and no results
    /// are returned.
    pub async fn dispatch(&self, samples: Vec<Sample>, plan: &ChunkPlan) -> Result<Vec<ProcessedResult>> {
        if self.pool.is_closed() {
            return Err(Error::ServiceShutdown);
        }

        let total = samples.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let samples: Arc<[Sample]> = samples.into();
        let (tx, mut rx) = mpsc::channel::<ProcessedResult>(total);
        let mut chunk_tasks = JoinSet::new();

        debug!(
            samples = total,
            chunks = plan.chunk_count(),
            workers = plan.worker_count,
            chunk_size = plan.chunk_size,
            "Dispatching batch"
        );

        for (chunk_id, range) in plan.chunks().enumerate() {
            // Acquire before spawning; dropping `chunk_tasks` on error aborts
            // the chunks already started.
            let permit = self.pool.acquire().await?;

            let samples = Arc::clone(&samples);
            let tx = tx.clone();
            let persister = self.persister.clone();

            chunk_tasks.spawn(async move {
                let _permit = permit;
                for sample in &samples[range] {
                    let optimized = transform(sample);
                    let _ = persister.persist(sample).await;

                    let result = ProcessedResult {
                        user_id: sample.user_id.clone(),
                        timestamp: sample.timestamp,
                        processed: true,
                        optimized,
                    };
                    if tx.send(result).await.is_err() {
                        debug!("Chunk {} stopping early, collector gone", chunk_id);
                        break;
                    }
                }
            });
        }

        // Channel closes once the last chunk task drops its sender
        drop(tx);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        while let Some(joined) = chunk_tasks.join_next().await {
            if let Err(e) = joined {
                error!("Chunk task failed: {}", e);
            }
        }

        Ok(results)
    }
}
