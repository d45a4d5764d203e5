use std::fmt;

use crate::Queue::Buffer::RingBuffer;
use crate::Queue::{BigQueue, BucketChain};

/// Debug function for RingBuffer
///
/// Shows cursors and counters only; payload bytes are never printed.
pub fn debug_ring_buffer(buffer: &RingBuffer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingBuffer")
        .field("capacity", &buffer.capacity())
        .field("max_capacity", &buffer.max_capacity)
        .field("head", &buffer.head)
        .field("tail", &buffer.tail)
        .field("used", &buffer.used)
        .field("count", &buffer.count)
        .field("full", &buffer.full)
        .finish()
}

/// Debug function for BucketChain
///
/// Shows:
/// - Configured bucket size and limit
/// - Lock-free item count
/// - Per-bucket stats, or `<locked>` if another thread holds the chain
pub fn debug_bucket_chain(chain: &BucketChain, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("BucketChain");
    s.field("bucket_capacity", &chain.bucket_capacity())
        .field("max_buckets", &chain.max_buckets())
        .field("len", &chain.len());
    match chain.try_stats() {
        Some(stats) => s.field("buckets", &stats.buckets),
        None => s.field("buckets", &format_args!("<locked>")),
    };
    s.finish()
}

/// Debug function for BigQueue
pub fn debug_big_queue(queue: &BigQueue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("BigQueue");
    match queue.try_stats() {
        Some(stats) => s.field("buffer", &stats),
        None => s.field("buffer", &format_args!("<locked>")),
    };
    s.finish()
}
