// A single bucket of the queue - a growable circular byte region holding framed entries

/// Capacity used by `RingBuffer::default()`.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A growable circular byte buffer holding an ordered run of framed entries.
///
/// Each entry is a varint length header followed by its payload (see
/// [`super::layout`]). Entries are appended at `tail` and removed at `head`;
/// both cursors wrap modulo the current capacity.
///
/// ### Invariants
/// - `head < capacity` and `tail < capacity` whenever `capacity > 0`.
/// - `used` is the circular span from `head` to `tail` and equals the summed
///   `entry_len` of the `count` live entries. `used == capacity` means the
///   region is exactly full, which is the one case where `head == tail` with
///   live data.
/// - `capacity <= max_capacity` whenever `max_capacity > 0`.
///
/// ### Ownership
/// The storage is owned exclusively. Nothing handed out by the buffer borrows
/// from it: `pop` returns a fresh `Vec<u8>`, since a later push may overwrite
/// the bytes in place and a growth relocates them entirely.
pub struct RingBuffer {
    /// The backing region. Its length is the current capacity.
    pub(crate) buffer: Vec<u8>,

    /// Upper bound `buffer` may grow to. Zero means unbounded.
    pub(crate) max_capacity: usize,

    /// Offset of the oldest entry's header.
    pub(crate) head: usize,

    /// Offset where the next entry's header will be written.
    pub(crate) tail: usize,

    /// Live bytes between `head` and `tail`, headers included.
    pub(crate) used: usize,

    /// Number of live entries.
    pub(crate) count: usize,

    /// Set when a push was rejected, cleared by the next successful push.
    pub(crate) full: bool,
}
