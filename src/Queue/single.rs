use parking_lot::Mutex;

use super::Buffer::RingBuffer;
use super::Structs::BucketStats;
use crate::Core::error::Result;

/// A synchronised queue over a single growable ring buffer.
///
/// Unlike [`BucketChain`](super::BucketChain) all data lives in one region,
/// which doubles on overflow up to `max_capacity` (`0` for no limit). Every
/// call, `len` included, takes the lock.
pub struct BigQueue {
    queue: Mutex<RingBuffer>,
}

impl BigQueue {
    pub fn new(capacity: usize, max_capacity: usize) -> Self {
        Self {
            queue: Mutex::new(RingBuffer::new(capacity, max_capacity)),
        }
    }

    pub fn push(&self, payload: &[u8]) -> Result<()> {
        self.queue.lock().push(payload)
    }

    /// Remove the oldest entry and return a copy of its payload.
    pub fn pop(&self) -> Result<Vec<u8>> {
        self.queue.lock().pop()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Whether the last push was rejected for lack of space.
    pub fn is_full(&self) -> bool {
        self.queue.lock().is_full()
    }

    pub fn reset(&self) {
        self.queue.lock().reset();
    }

    pub fn stats(&self) -> BucketStats {
        self.queue.lock().stats()
    }

    pub(crate) fn try_stats(&self) -> Option<BucketStats> {
        self.queue.try_lock().map(|queue| queue.stats())
    }
}
