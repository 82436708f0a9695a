//! Batch-ingestion pipeline
//!
//! - [`partition`] - adaptive worker count and chunk boundaries
//! - [`transform`] - pure per-sample derivation
//! - [`dispatcher`] - bounded concurrent execution of chunks

pub mod dispatcher;
pub mod partition;
pub mod transform;

pub use dispatcher::{Dispatcher, WorkerPool};
pub use partition::{partition, ChunkPlan};
pub use transform::transform;
