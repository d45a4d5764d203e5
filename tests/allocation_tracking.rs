// Allocation tracking tests for the bucket chain
//
// Note: Tests using dhat are marked with #[serial_test::serial] because
// dhat only allows one profiler to run at a time. They will run sequentially.
//
// # Run all allocation tracking tests
// cargo test --test allocation_tracking -- --nocapture

use bigqueue::{BigQueue, BucketChain};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[test]
#[serial_test::serial]
fn test_push_into_allocated_bucket_is_allocation_free() {
    let _dhat = dhat::Profiler::builder().testing().build();

    let chain = BucketChain::new(64 * 1024, 2);
    let payload = [7u8; 128];

    // Warm up the lock's per-thread bookkeeping.
    chain.push(&payload).unwrap();
    chain.pop().unwrap();

    let before = dhat::HeapStats::get();
    for _ in 0..100 {
        chain.push(&payload).unwrap();
    }
    let after = dhat::HeapStats::get();

    println!("blocks before: {}, after: {}", before.total_blocks, after.total_blocks);
    assert_eq!(after.total_blocks, before.total_blocks);
}

#[test]
#[serial_test::serial]
fn test_each_pop_allocates_exactly_its_copy() {
    let _dhat = dhat::Profiler::builder().testing().build();

    let chain = BucketChain::new(64 * 1024, 2);
    let payload = [3u8; 256];
    chain.push(&payload).unwrap();
    chain.pop().unwrap();
    for _ in 0..100 {
        chain.push(&payload).unwrap();
    }

    let before = dhat::HeapStats::get();
    for _ in 0..100 {
        let data = chain.pop().unwrap();
        assert_eq!(data.len(), payload.len());
    }
    let after = dhat::HeapStats::get();

    assert_eq!(after.total_blocks - before.total_blocks, 100);
    assert_eq!(after.total_bytes - before.total_bytes, 100 * payload.len() as u64);
}

#[test]
#[serial_test::serial]
fn test_new_bucket_is_one_bounded_allocation() {
    let _dhat = dhat::Profiler::builder().testing().build();

    let bucket = 4096;
    let chain = BucketChain::new(bucket, 4);
    let payload = vec![1u8; 1000];
    // Four entries fill the first bucket.
    for _ in 0..4 {
        chain.push(&payload).unwrap();
    }

    let before = dhat::HeapStats::get();
    chain.push(&payload).unwrap(); // spills into a second bucket
    let after = dhat::HeapStats::get();

    assert_eq!(chain.bucket_count(), 2);
    assert!(after.total_bytes - before.total_bytes >= bucket as u64);
    assert!(after.max_bytes <= 8 * bucket + 4096);
}

#[test]
#[serial_test::serial]
fn test_big_queue_growth_reallocates_once() {
    let _dhat = dhat::Profiler::builder().testing().build();

    // Register the growth log callsite outside the measured window.
    BigQueue::new(1, 0).push(&[0u8; 4]).unwrap();

    let queue = BigQueue::new(64, 0);
    queue.push(&[0u8; 40]).unwrap();

    let before = dhat::HeapStats::get();
    queue.push(&[0u8; 40]).unwrap(); // 82 live bytes, 64 -> 128
    let after = dhat::HeapStats::get();

    assert_eq!(queue.stats().capacity, 128);
    assert_eq!(after.total_blocks - before.total_blocks, 1);
}
