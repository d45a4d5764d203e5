mod builder;
mod chain;
mod consumer;
mod debug;
mod producer;
mod single;

pub use builder::{channel, QueueBuilder};
pub use chain::BucketChain;
pub use consumer::Consumer;
pub use producer::Producer;
pub use single::BigQueue;

use crate::Core::error::Result;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod layout;
    pub use Buffer::{RingBuffer, DEFAULT_CAPACITY}; // re-export for stable path
}

pub mod Structs {
    pub mod Buffer_Structs;
    pub use Buffer_Structs::{BucketStats, ChainStats}; // re-export for stable path
}

/// The operations producer and consumer handles need from a shared queue.
pub trait BytesQueue: Send + Sync {
    /// Store a copy of `payload` at the tail.
    fn push(&self, payload: &[u8]) -> Result<()>;

    /// Remove the oldest entry and return it.
    fn pop(&self) -> Result<Vec<u8>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reset(&self);
}

impl BytesQueue for BucketChain {
    fn push(&self, payload: &[u8]) -> Result<()> {
        BucketChain::push(self, payload)
    }

    fn pop(&self) -> Result<Vec<u8>> {
        BucketChain::pop(self)
    }

    fn len(&self) -> usize {
        BucketChain::len(self).max(0) as usize
    }

    fn reset(&self) {
        BucketChain::reset(self)
    }
}

impl BytesQueue for BigQueue {
    fn push(&self, payload: &[u8]) -> Result<()> {
        BigQueue::push(self, payload)
    }

    fn pop(&self) -> Result<Vec<u8>> {
        BigQueue::pop(self)
    }

    fn len(&self) -> usize {
        BigQueue::len(self)
    }

    fn reset(&self) {
        BigQueue::reset(self)
    }
}
