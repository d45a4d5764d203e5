use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{BucketChain, BytesQueue};
use crate::Core::error::{QueueError, Result};

/// First sleep between polls of an empty queue.
const MIN_BACKOFF: Duration = Duration::from_micros(1);
/// Longest sleep between polls of an empty queue.
const MAX_BACKOFF: Duration = Duration::from_millis(1);

/// A handle for taking payloads out of a shared queue.
///
/// The queue itself never blocks; the waiting variants here poll it with a
/// short, growing sleep. Several consumers may share one queue.
pub struct Consumer<Q: BytesQueue = BucketChain> {
    queue: Arc<Q>,
    producers: Arc<AtomicUsize>,
}

impl<Q: BytesQueue> Consumer<Q> {
    pub(crate) fn new(queue: Arc<Q>, producers: Arc<AtomicUsize>) -> Self {
        Self { queue, producers }
    }

    /// Receives a message from the queue if one is available.
    ///
    /// # Returns
    /// * `Ok(Some(data))` if a message was received
    /// * `Ok(None)` if no message is available
    /// * `Err(QueueError::Disconnected)` if the queue is empty and every
    ///   producer has been dropped
    pub fn receive(&self) -> Result<Option<Vec<u8>>> {
        match self.queue.pop() {
            Ok(data) => Ok(Some(data)),
            Err(QueueError::EmptyQueue) => {
                if self.is_producer_alive() {
                    return Ok(None);
                }
                // A producer may have pushed and dropped since the pop above.
                match self.queue.pop() {
                    Ok(data) => Ok(Some(data)),
                    Err(QueueError::EmptyQueue) => Err(QueueError::Disconnected),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Receives a message, waiting until one is available or all producers are gone.
    pub fn receive_blocking(&self) -> Result<Vec<u8>> {
        let mut backoff = MIN_BACKOFF;
        loop {
            if let Some(data) = self.receive()? {
                return Ok(data);
            }
            std::thread::sleep(backoff);
            backoff = std::cmp::min(backoff * 2, MAX_BACKOFF);
        }
    }

    /// Receives a message from the queue, waiting up to the specified timeout.
    ///
    /// # Returns
    /// * `Ok(Some(data))` if a message was received
    /// * `Ok(None)` if the timeout was reached
    /// * `Err(QueueError::Disconnected)` if every producer has been dropped
    pub fn receive_timeout(&self, timeout: Duration) -> Result<Option<Vec<u8>>> {
        let start = Instant::now();
        let mut backoff = MIN_BACKOFF;

        loop {
            if let Some(data) = self.receive()? {
                return Ok(Some(data));
            }

            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Ok(None);
            }
            std::thread::sleep(std::cmp::min(remaining, backoff));
            backoff = std::cmp::min(backoff * 2, MAX_BACKOFF);
        }
    }

    /// Items currently queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the shared queue
    pub fn queue(&self) -> &Arc<Q> {
        &self.queue
    }

    fn is_producer_alive(&self) -> bool {
        self.producers.load(Ordering::Acquire) > 0
    }
}

impl<Q: BytesQueue> Clone for Consumer<Q> {
    fn clone(&self) -> Self {
        Self::new(self.queue.clone(), self.producers.clone())
    }
}
