// Plain snapshot structs reported by the buffers; no atomics, no references into storage

/// Counters for a single bucket at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketStats {
    pub capacity: usize,
    /// Zero means the bucket may grow without bound.
    pub max_capacity: usize,
    pub used_bytes: usize,
    pub entries: usize,
    pub full: bool,
}

/// Counters for a whole chain, head bucket first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub buckets: Vec<BucketStats>,
    pub max_buckets: usize,
    /// Value of the lock-free item counter when the snapshot was taken.
    pub total_entries: i64,
}

impl ChainStats {
    /// Bytes reserved across every bucket.
    pub fn allocated_bytes(&self) -> usize {
        self.buckets.iter().map(|b| b.capacity).sum()
    }

    /// Bytes held by live entries across every bucket.
    pub fn used_bytes(&self) -> usize {
        self.buckets.iter().map(|b| b.used_bytes).sum()
    }
}
