use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::{BucketChain, BytesQueue, Consumer, Producer};
use crate::Core::error::{QueueError, Result};
use crate::Core::units::MB;

pub struct QueueBuilder {
    bucket_capacity: usize,
    max_buckets: usize,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            bucket_capacity: MB(10.0), // 10MB per bucket
            max_buckets: 10,           // 100MB total
        }
    }
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket_capacity(mut self, bytes: usize) -> Self {
        self.bucket_capacity = bytes;
        self
    }

    pub fn with_max_buckets(mut self, max_buckets: usize) -> Self {
        self.max_buckets = max_buckets;
        self
    }

    pub fn build_chain(self) -> Result<BucketChain> {
        if self.bucket_capacity == 0 {
            return Err(QueueError::InvalidConfig(
                "bucket capacity must be greater than zero".into(),
            ));
        }
        if self.max_buckets == 0 {
            return Err(QueueError::InvalidConfig(
                "max buckets must be greater than zero".into(),
            ));
        }
        Ok(BucketChain::new(self.bucket_capacity, self.max_buckets))
    }

    /// Build a chain and hand out one producer and one consumer sharing it.
    pub fn build(self) -> Result<(Producer, Consumer)> {
        Ok(channel(Arc::new(self.build_chain()?)))
    }
}

/// Wrap an existing queue in a producer/consumer pair.
///
/// The pair shares a live-producer count: once every `Producer` clone is
/// dropped and the queue is drained, consumers report `Disconnected`.
pub fn channel<Q: BytesQueue>(queue: Arc<Q>) -> (Producer<Q>, Consumer<Q>) {
    let producers = Arc::new(AtomicUsize::new(0));
    let producer = Producer::new(queue.clone(), producers.clone());
    let consumer = Consumer::new(queue, producers);
    (producer, consumer)
}
