use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::Buffer::RingBuffer;
use super::Structs::ChainStats;
use crate::Core::error::{QueueError, Result};

/// An unbounded-looking FIFO built from fixed-size ring buffers chained in order.
///
/// Pushes go to the tail bucket; when it overflows a fresh bucket of
/// `bucket_capacity` bytes is appended, up to `max_buckets`. Pops read from the
/// head bucket and evict it once drained, as long as another bucket remains.
/// The layout is the same idea as a quicklist: a list of packed byte regions.
///
/// ### Concurrency Design:
/// - **Structure and contents**: every operation that touches a bucket runs
///   under one `parking_lot::Mutex` for its whole duration.
/// - **Size**: `len()` reads a separate atomic counter and never takes the
///   lock. The counter is updated while the lock is held, so it is exact
///   whenever no push or pop is in flight.
///
/// Nothing here blocks waiting for the other side: an empty pop and a rejected
/// push both return immediately.
pub struct BucketChain {
    /// Head bucket at the front. Never empty.
    buckets: Mutex<VecDeque<RingBuffer>>,

    /// Capacity and growth bound of every bucket.
    bucket_capacity: usize,

    /// Hard cap on simultaneous buckets.
    max_buckets: usize,

    /// Items across all buckets.
    /// Padded so monitoring reads do not contend with the lock's cache line.
    counter: CachePadded<AtomicI64>,
}

impl BucketChain {
    /// Create a chain holding one empty bucket.
    ///
    /// # Panics
    /// Panics if `bucket_capacity == 0` or `max_buckets == 0`. Use
    /// [`QueueBuilder`](super::QueueBuilder) to get an error instead.
    pub fn new(bucket_capacity: usize, max_buckets: usize) -> Self {
        assert!(bucket_capacity > 0, "BucketChain bucket capacity must be > 0");
        assert!(max_buckets > 0, "BucketChain max buckets must be > 0");

        let mut buckets = VecDeque::new();
        buckets.push_back(Self::alloc_bucket(bucket_capacity));

        Self {
            buckets: Mutex::new(buckets),
            bucket_capacity,
            max_buckets,
            counter: CachePadded::new(AtomicI64::new(0)),
        }
    }

    // Buckets never grow past their allotment, so one allocation stays bounded.
    fn alloc_bucket(bucket_capacity: usize) -> RingBuffer {
        RingBuffer::new(bucket_capacity, bucket_capacity)
    }

    /// Append `payload` at the tail of the queue.
    ///
    /// # Returns
    /// * `Ok(())` if the payload was stored
    /// * `Err(QueueError::OverflowQueue)` if the tail bucket is full and the
    ///   chain is at `max_buckets`, or the payload is larger than a whole
    ///   bucket. The queue is unchanged in both cases.
    pub fn push(&self, payload: &[u8]) -> Result<()> {
        let mut buckets = self.buckets.lock();

        if let Some(tail) = buckets.back_mut() {
            if tail.push(payload).is_ok() {
                self.counter.fetch_add(1, Ordering::AcqRel);
                return Ok(());
            }
        }

        if buckets.len() >= self.max_buckets {
            debug!(
                buckets = buckets.len(),
                payload_len = payload.len(),
                "push rejected, bucket limit reached"
            );
            return Err(QueueError::OverflowQueue);
        }

        // Fill the new bucket before linking it so a failure leaves no orphan.
        let mut bucket = Self::alloc_bucket(self.bucket_capacity);
        if let Err(err) = bucket.push(payload) {
            warn!(
                payload_len = payload.len(),
                bucket_capacity = self.bucket_capacity,
                "push rejected, payload does not fit in an empty bucket"
            );
            return Err(err);
        }

        buckets.push_back(bucket);
        self.counter.fetch_add(1, Ordering::AcqRel);
        debug!(buckets = buckets.len(), "bucket appended");
        Ok(())
    }

    /// Remove the oldest entry and return a copy of its payload.
    ///
    /// Drained buckets at the head are evicted first, keeping at least one.
    /// Returns `Err(QueueError::EmptyQueue)` when no entry is stored.
    pub fn pop(&self) -> Result<Vec<u8>> {
        let mut buckets = self.buckets.lock();

        while buckets.len() > 1 && buckets.front().map_or(false, RingBuffer::is_empty) {
            buckets.pop_front();
            debug!(buckets = buckets.len(), "drained bucket evicted");
        }

        let head = buckets.front_mut().ok_or(QueueError::EmptyQueue)?;
        let payload = head.pop()?;
        self.counter.fetch_sub(1, Ordering::AcqRel);
        Ok(payload)
    }

    /// Number of stored items, read without taking the lock.
    ///
    /// May trail a push or pop that is completing concurrently.
    pub fn len(&self) -> i64 {
        self.counter.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.lock().len()
    }

    /// Empty every bucket in place. Bucket count and capacities are kept.
    pub fn reset(&self) {
        let mut buckets = self.buckets.lock();
        for bucket in buckets.iter_mut() {
            bucket.reset();
        }
        self.counter.store(0, Ordering::Release);
        trace!(buckets = buckets.len(), "bucket chain reset");
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    pub fn max_buckets(&self) -> usize {
        self.max_buckets
    }

    /// Snapshot of every bucket, head first.
    pub fn stats(&self) -> ChainStats {
        let buckets = self.buckets.lock();
        ChainStats {
            buckets: buckets.iter().map(RingBuffer::stats).collect(),
            max_buckets: self.max_buckets,
            total_entries: self.len(),
        }
    }

    /// Lock-holding view for debug formatting; `None` while contended.
    pub(crate) fn try_stats(&self) -> Option<ChainStats> {
        let buckets = self.buckets.try_lock()?;
        Some(ChainStats {
            buckets: buckets.iter().map(RingBuffer::stats).collect(),
            max_buckets: self.max_buckets,
            total_entries: self.len(),
        })
    }
}
