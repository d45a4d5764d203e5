//! Entry framing inside a bucket.
//!
//! Every entry is a length header followed by the raw payload bytes. The header
//! is the payload length as an unsigned LEB128 varint: seven bits per byte,
//! low group first, high bit set on every byte except the last. Short payloads
//! (< 128 bytes) pay a single byte of framing and zero-length payloads are a
//! lone `0x00`.
//!
//! Either part of an entry may straddle the physical end of the ring, so the
//! decoder consumes bytes from an iterator rather than a contiguous slice.

/// Longest header a `u64` length can produce.
pub const MAX_HEADER_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const GROUP_MASK: u8 = 0x7F;

/// Number of header bytes needed to frame a payload of `payload_len` bytes.
#[inline]
pub fn header_len(payload_len: usize) -> usize {
    let mut n = payload_len as u64;
    let mut bytes = 1;
    while n >= CONTINUATION as u64 {
        n >>= 7;
        bytes += 1;
    }
    bytes
}

/// Total bytes an entry occupies in a bucket.
#[inline]
pub fn entry_len(payload_len: usize) -> usize {
    header_len(payload_len) + payload_len
}

/// Writes the header for `payload_len` into `out` and returns its length.
pub fn encode_header(payload_len: usize, out: &mut [u8; MAX_HEADER_LEN]) -> usize {
    let mut n = payload_len as u64;
    let mut i = 0;
    while n >= CONTINUATION as u64 {
        out[i] = (n as u8 & GROUP_MASK) | CONTINUATION;
        n >>= 7;
        i += 1;
    }
    out[i] = n as u8;
    i + 1
}

/// Decodes a header from the front of `bytes`.
///
/// Returns `(payload_len, header_len)`, or `None` when the input ends before
/// the terminating byte, runs past `MAX_HEADER_LEN`, or the value does not fit
/// in a `usize`.
pub fn decode_header<I>(bytes: I) -> Option<(usize, usize)>
where
    I: IntoIterator<Item = u8>,
{
    let mut value: u64 = 0;
    for (i, byte) in bytes.into_iter().take(MAX_HEADER_LEN).enumerate() {
        let group = (byte & GROUP_MASK) as u64;
        let shift = 7 * i as u32;
        // The tenth byte may only carry the single remaining bit of a u64.
        if i == MAX_HEADER_LEN - 1 && group > 1 {
            return None;
        }
        value |= group << shift;
        if byte & CONTINUATION == 0 {
            return usize::try_from(value).ok().map(|len| (len, i + 1));
        }
    }
    None
}
