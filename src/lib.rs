//! # bigqueue
//!
//! An in-memory FIFO queue for opaque byte records. Records are packed into
//! contiguous wraparound ring buffers ("buckets") which are chained end to end,
//! so the queue can hold very large volumes without a heap allocation per
//! record and without any single allocation growing past one bucket.
//!
//! ```
//! use bigqueue::Queue::BucketChain;
//!
//! let chain = BucketChain::new(1024, 4);
//! chain.push(b"hello").unwrap();
//! assert_eq!(chain.len(), 1);
//! assert_eq!(chain.pop().unwrap(), b"hello");
//! ```

// Module naming follows project convention (Queue = the byte queue, Core = shared plumbing)
#[allow(non_snake_case)]
pub mod Queue;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
mod Debug;

pub use Core::error::{QueueError, Result};
pub use Queue::{BigQueue, BucketChain, BytesQueue, Consumer, Producer, QueueBuilder};
