//! Byte-size helpers for sizing buckets.

const ONE_MB: f32 = 1024.0 * 1024.0;
const ONE_GB: f32 = 1024.0 * 1024.0 * 1024.0;

/// Number of bytes in `n` mebibytes, truncated toward zero.
#[allow(non_snake_case)]
pub fn MB(n: f32) -> usize {
    (n * ONE_MB) as usize
}

/// Number of bytes in `n` gibibytes, truncated toward zero.
#[allow(non_snake_case)]
pub fn GB(n: f32) -> usize {
    (n * ONE_GB) as usize
}
