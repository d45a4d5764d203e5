use tracing::{debug, trace};

use super::layout::{self, MAX_HEADER_LEN};
use super::Buffer::{RingBuffer, DEFAULT_CAPACITY};
use crate::Core::error::{QueueError, Result};
use crate::Queue::Structs::Buffer_Structs::BucketStats;

impl RingBuffer {
    /// Create an empty buffer with `capacity` bytes of storage.
    ///
    /// `max_capacity` bounds later growth; `0` lets the buffer grow without
    /// limit. An initial capacity above a non-zero `max_capacity` is clamped.
    pub fn new(capacity: usize, max_capacity: usize) -> Self {
        let capacity = if max_capacity > 0 {
            capacity.min(max_capacity)
        } else {
            capacity
        };
        Self {
            buffer: vec![0u8; capacity],
            max_capacity,
            head: 0,
            tail: 0,
            used: 0,
            count: 0,
            full: false,
        }
    }

    /// Current size of the backing region in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the last push was rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Bytes held by live entries, headers included.
    #[inline]
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn free_bytes(&self) -> usize {
        self.capacity() - self.used
    }

    /// Append `payload` as a new entry at the tail.
    ///
    /// Grows the region when the entry does not fit and growth is allowed.
    /// All or nothing: on `OverflowQueue` no byte of the entry was written and
    /// only the `full` flag changed.
    pub fn push(&mut self, payload: &[u8]) -> Result<()> {
        let needed = layout::entry_len(payload.len());
        if needed > self.free_bytes() && !self.grow(needed) {
            self.full = true;
            return Err(QueueError::OverflowQueue);
        }

        let mut header = [0u8; MAX_HEADER_LEN];
        let header_len = layout::encode_header(payload.len(), &mut header);
        let after_header = self.write_at(self.tail, &header[..header_len]);
        self.tail = self.write_at(after_header, payload);
        self.used += needed;
        self.count += 1;
        self.full = false;

        debug_assert!(self.tail < self.capacity());
        debug_assert!(self.used <= self.capacity());
        Ok(())
    }

    /// Remove the oldest entry and return a copy of its payload.
    ///
    /// # Panics
    /// Panics if the header at `head` does not decode or claims more bytes
    /// than are live. Either means the storage is corrupt.
    pub fn pop(&mut self) -> Result<Vec<u8>> {
        if self.count == 0 {
            return Err(QueueError::EmptyQueue);
        }

        let head = self.head;
        let (payload_len, header_len) = match layout::decode_header(self.live_bytes_from(head)) {
            Some(decoded) => decoded,
            None => panic!("corrupt entry header at offset {head}"),
        };
        let entry = header_len + payload_len;
        assert!(
            entry <= self.used,
            "entry at offset {head} spans {entry} bytes but only {} are live",
            self.used
        );

        let mut payload = Vec::with_capacity(payload_len);
        let start = (head + header_len) % self.capacity();
        self.head = self.extend_from(start, payload_len, &mut payload);
        self.used -= entry;
        self.count -= 1;

        if self.count == 0 {
            // Drained: rewind so the next pushes get the longest contiguous run.
            debug_assert_eq!(self.used, 0);
            self.head = 0;
            self.tail = 0;
        }
        debug_assert!(self.head < self.capacity());
        Ok(payload)
    }

    /// Drop every entry. Capacity is kept.
    pub fn reset(&mut self) {
        trace!(entries = self.count, capacity = self.capacity(), "ring buffer reset");
        self.head = 0;
        self.tail = 0;
        self.used = 0;
        self.count = 0;
        self.full = false;
    }

    /// Point-in-time counters for this buffer.
    pub fn stats(&self) -> BucketStats {
        BucketStats {
            capacity: self.capacity(),
            max_capacity: self.max_capacity,
            used_bytes: self.used,
            entries: self.count,
            full: self.full,
        }
    }

    /// Reallocate so that an entry of `needed` bytes fits, unwrapping the live
    /// data to offset 0. Returns false when the bound forbids it.
    fn grow(&mut self, needed: usize) -> bool {
        let capacity = self.capacity();
        if self.max_capacity > 0 && capacity >= self.max_capacity {
            return false;
        }

        let required = self.used + needed;
        let mut new_capacity = capacity.saturating_mul(2).max(required);
        if self.max_capacity > 0 {
            new_capacity = new_capacity.min(self.max_capacity);
        }
        if new_capacity < required {
            return false;
        }

        let mut buffer = Vec::with_capacity(new_capacity);
        if self.used > 0 {
            self.extend_from(self.head, self.used, &mut buffer);
        }
        buffer.resize(new_capacity, 0);

        debug!(
            from = capacity,
            to = new_capacity,
            live_bytes = self.used,
            entries = self.count,
            "ring buffer grown"
        );

        self.buffer = buffer;
        self.head = 0;
        // `required > used`, so this never wraps.
        self.tail = self.used;
        true
    }

    /// Copy `bytes` in at `pos`, wrapping past the end. Returns the offset
    /// just after the last byte written.
    fn write_at(&mut self, pos: usize, bytes: &[u8]) -> usize {
        if bytes.is_empty() {
            return pos;
        }
        let cap = self.capacity();
        debug_assert!(pos < cap);
        debug_assert!(bytes.len() <= cap);

        let first = (cap - pos).min(bytes.len());
        self.buffer[pos..pos + first].copy_from_slice(&bytes[..first]);
        if bytes.len() > first {
            self.buffer[..bytes.len() - first].copy_from_slice(&bytes[first..]);
        }
        (pos + bytes.len()) % cap
    }

    /// Append `len` bytes starting at `pos` to `out`, wrapping past the end.
    /// Returns the offset just after the last byte read.
    fn extend_from(&self, pos: usize, len: usize, out: &mut Vec<u8>) -> usize {
        if len == 0 {
            return pos;
        }
        let cap = self.capacity();
        debug_assert!(pos < cap);
        debug_assert!(len <= cap);

        let first = (cap - pos).min(len);
        out.extend_from_slice(&self.buffer[pos..pos + first]);
        if len > first {
            out.extend_from_slice(&self.buffer[..len - first]);
        }
        (pos + len) % cap
    }

    /// Live bytes in logical order starting at `pos`, bounded by `used`.
    fn live_bytes_from(&self, pos: usize) -> impl Iterator<Item = u8> + '_ {
        let cap = self.capacity();
        (0..self.used).map(move |i| self.buffer[(pos + i) % cap])
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, 0)
    }
}
