use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{BucketChain, BytesQueue};
use crate::Core::error::Result;

/// A handle for pushing payloads into a shared queue.
///
/// Cloning registers another live producer; dropping deregisters it. The
/// count is what lets a [`Consumer`](super::Consumer) tell an idle queue from
/// an abandoned one.
pub struct Producer<Q: BytesQueue = BucketChain> {
    queue: Arc<Q>,
    producers: Arc<AtomicUsize>,
}

impl<Q: BytesQueue> Producer<Q> {
    pub(crate) fn new(queue: Arc<Q>, producers: Arc<AtomicUsize>) -> Self {
        producers.fetch_add(1, Ordering::AcqRel);
        Self { queue, producers }
    }

    /// Sends a message through the queue.
    ///
    /// # Returns
    /// * `Ok(())` if the message was stored
    /// * `Err(QueueError::OverflowQueue)` if there is no room for it; nothing
    ///   is retried, so the caller decides whether to wait, drop or reject
    pub fn send<T: AsRef<[u8]>>(&self, message: T) -> Result<()> {
        self.queue.push(message.as_ref())
    }

    /// Send messages in order, stopping at the first one the queue rejects.
    ///
    /// Returns how many were stored; anything short of `messages.len()` means
    /// the queue overflowed at that index.
    pub fn send_batch(&self, messages: &[&[u8]]) -> usize {
        messages
            .iter()
            .take_while(|msg| self.queue.push(msg).is_ok())
            .count()
    }

    /// Returns the shared queue
    pub fn queue(&self) -> &Arc<Q> {
        &self.queue
    }

    /// Number of producer handles currently alive, this one included
    pub fn producer_count(&self) -> usize {
        self.producers.load(Ordering::Acquire)
    }
}

impl<Q: BytesQueue> Clone for Producer<Q> {
    fn clone(&self) -> Self {
        Self::new(self.queue.clone(), self.producers.clone())
    }
}

impl<Q: BytesQueue> Drop for Producer<Q> {
    fn drop(&mut self) {
        self.producers.fetch_sub(1, Ordering::AcqRel);
    }
}
