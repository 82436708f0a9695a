//! Key-value store seam and best-effort sample persistence
//!
//! The store is an external collaborator: [`LocationStore`] is the narrow
//! interface the service needs from it (SET with TTL, PING), and
//! [`Persister`] wraps an optional store with a deadline and the
//! best-effort contract used by the dispatcher.

pub mod redis;

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Sample;

pub use self::redis::RedisLocationStore;

/// Store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not create a client or establish a connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backend rejected or failed the command
    #[error("Backend error: {0}")]
    Backend(String),

    /// Sample could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation exceeded its deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Minimal key-value store interface
///
/// Implementations must tolerate concurrent writes to distinct keys.
#[async_trait]
pub trait LocationStore: Send + Sync + Debug {
    /// Write `value` under `key`, expiring after `ttl`
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Round-trip check used at startup
    async fn ping(&self) -> StoreResult<()>;

    /// Short name for logs
    fn provider_name(&self) -> &'static str;
}

/// Best-effort write-through of samples to an optional store
///
/// [`Persister::persist`] returns a `Result` so the outcome is observable in
/// tests, but it logs every failure itself and callers on the request path
/// discard it. Without a store every call is a no-op.
#[derive(Clone, Debug)]
pub struct Persister {
    store: Option<Arc<dyn LocationStore>>,
    timeout: Duration,
    ttl: Duration,
}

impl Persister {
    pub fn new(store: Option<Arc<dyn LocationStore>>, timeout: Duration, ttl: Duration) -> Self {
        Self {
            store,
            timeout,
            ttl,
        }
    }

    /// Persister with no backing store
    pub fn disabled() -> Self {
        Self::new(None, Duration::from_secs(2), Duration::from_secs(24 * 60 * 60))
    }

    /// True when a store is configured
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn provider_name(&self) -> &'static str {
        self.store.as_ref().map_or("none", |s| s.provider_name())
    }

    /// Serialize `sample` and write it under its store key.
    ///
    /// Never blocks longer than the configured deadline. Errors are logged
    /// here and are not meant to be acted upon by the caller.
    pub async fn persist(&self, sample: &Sample) -> StoreResult<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        let key = sample.store_key();
        let result = match serde_json::to_string(sample) {
            Ok(value) => {
                match tokio::time::timeout(self.timeout, store.set_with_ttl(&key, &value, self.ttl))
                    .await
                {
                    Ok(res) => res,
                    Err(_) => Err(StoreError::Timeout(self.timeout)),
                }
            }
            Err(e) => Err(StoreError::from(e)),
        };

        match &result {
            Ok(()) => debug!(key = %key, "Sample persisted"),
            Err(StoreError::Timeout(_)) => warn!(key = %key, "Sample persist timed out"),
            Err(e) => debug!(key = %key, error = %e, "Sample persist failed"),
        }

        result
    }
}
