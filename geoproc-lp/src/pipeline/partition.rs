//! Adaptive work partitioning
//!
//! Small batches are not worth fanning out: fewer than 5 samples run on a
//! single worker, fewer than 20 on two, anything larger on eight.

use std::ops::Range;

/// Batches below this size use a single worker
const SINGLE_WORKER_BELOW: usize = 5;
/// Batches below this size use two workers
const TWO_WORKERS_BELOW: usize = 20;
const MAX_FANOUT: usize = 8;

/// Worker count and stride for one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    pub worker_count: usize,
    pub chunk_size: usize,
    batch_len: usize,
}

/// Decide how a batch of `batch_len` samples is split across workers
pub fn partition(batch_len: usize) -> ChunkPlan {
    let worker_count = if batch_len < SINGLE_WORKER_BELOW {
        1
    } else if batch_len < TWO_WORKERS_BELOW {
        2
    } else {
        MAX_FANOUT
    };

    let chunk_size = (batch_len / worker_count).max(1);

    ChunkPlan {
        worker_count,
        chunk_size,
        batch_len,
    }
}

impl ChunkPlan {
    /// Number of chunks this plan produces (never more than `worker_count`)
    pub fn chunk_count(&self) -> usize {
        if self.batch_len == 0 {
            return 0;
        }
        (self.batch_len / self.chunk_size).clamp(1, self.worker_count)
    }

    /// Contiguous index ranges covering `0..batch_len` exactly once
    ///
    /// Every chunk spans `chunk_size` samples except the last, which runs to
    /// the end of the batch and so absorbs any remainder.
    pub fn chunks(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let count = self.chunk_count();
        (0..count).map(move |i| {
            let start = i * self.chunk_size;
            let end = if i + 1 == count {
                self.batch_len
            } else {
                start + self.chunk_size
            };
            start..end
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_lens(plan: &ChunkPlan) -> Vec<usize> {
        plan.chunks().map(|r| r.len()).collect()
    }

    #[test]
    fn test_small_batch_uses_one_worker() {
        let plan = partition(3);
        assert_eq!(plan.worker_count, 1);
        assert_eq!(plan.chunk_size, 3);
        assert_eq!(chunk_lens(&plan), vec![3]);
    }

    #[test]
    fn test_medium_batch_uses_two_workers() {
        let plan = partition(10);
        assert_eq!(plan.worker_count, 2);
        assert_eq!(plan.chunk_size, 5);
        assert_eq!(chunk_lens(&plan), vec![5, 5]);
    }

    #[test]
    fn test_large_batch_even_split() {
        let plan = partition(24);
        assert_eq!(plan.worker_count, 8);
        assert_eq!(plan.chunk_size, 3);
        assert_eq!(chunk_lens(&plan), vec![3; 8]);
    }

    #[test]
    fn test_last_chunk_absorbs_remainder() {
        let plan = partition(25);
        assert_eq!(plan.worker_count, 8);
        assert_eq!(plan.chunk_size, 3);
        assert_eq!(chunk_lens(&plan), vec![3, 3, 3, 3, 3, 3, 3, 4]);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(partition(4).worker_count, 1);
        assert_eq!(partition(5).worker_count, 2);
        assert_eq!(partition(19).worker_count, 2);
        assert_eq!(partition(20).worker_count, 8);
        assert_eq!(partition(1000).worker_count, 8);
    }

    #[test]
    fn test_empty_batch_has_no_chunks() {
        let plan = partition(0);
        assert_eq!(plan.worker_count, 1);
        assert_eq!(plan.chunk_size, 1);
        assert_eq!(plan.chunks().count(), 0);
    }

    #[test]
    fn test_single_sample() {
        let plan = partition(1);
        assert_eq!(plan.chunks().collect::<Vec<_>>(), vec![0..1]);
    }

    #[test]
    fn test_chunks_cover_every_index_once() {
        for len in 0..=1000 {
            let plan = partition(len);
            let mut next = 0;
            for range in plan.chunks() {
                assert_eq!(range.start, next, "gap or overlap for len {}", len);
                assert!(!range.is_empty());
                next = range.end;
            }
            assert_eq!(next, len, "chunks do not cover len {}", len);
            assert!(plan.chunk_count() <= plan.worker_count);
        }
    }
}
