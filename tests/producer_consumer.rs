use bigqueue::Core::{GB, MB};
use bigqueue::Queue::channel;
use bigqueue::{BigQueue, BytesQueue, QueueBuilder, QueueError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn builder_defaults() {
    let chain = QueueBuilder::new().build_chain().unwrap();
    assert_eq!(chain.bucket_capacity(), 10 * 1024 * 1024);
    assert_eq!(chain.max_buckets(), 10);
    assert_eq!(chain.bucket_count(), 1);
}

#[test]
fn size_helpers() {
    assert_eq!(MB(1.0), 1024 * 1024);
    assert_eq!(MB(0.5), 512 * 1024);
    assert_eq!(GB(1.0), 1024 * 1024 * 1024);
}

#[test]
fn builder_rejects_zero_sizes() {
    let err = QueueBuilder::new().with_bucket_capacity(0).build_chain().unwrap_err();
    assert!(matches!(err, QueueError::InvalidConfig(_)));

    let err = QueueBuilder::new().with_max_buckets(0).build().unwrap_err();
    assert!(matches!(err, QueueError::InvalidConfig(_)));
}

#[test]
fn send_and_receive() {
    let (producer, consumer) = QueueBuilder::new()
        .with_bucket_capacity(1024)
        .with_max_buckets(2)
        .build()
        .unwrap();

    producer.send("hello").unwrap();
    producer.send(vec![1u8, 2, 3]).unwrap();
    assert_eq!(consumer.len(), 2);

    assert_eq!(consumer.receive().unwrap(), Some(b"hello".to_vec()));
    assert_eq!(consumer.receive().unwrap(), Some(vec![1, 2, 3]));
    assert_eq!(consumer.receive().unwrap(), None);
}

#[test]
fn receive_reports_disconnect_after_drain() {
    let (producer, consumer) = QueueBuilder::new()
        .with_bucket_capacity(1024)
        .build()
        .unwrap();

    assert_eq!(consumer.receive().unwrap(), None);

    let second = producer.clone();
    assert_eq!(producer.producer_count(), 2);
    producer.send("last").unwrap();
    drop(producer);
    assert_eq!(second.producer_count(), 1);
    drop(second);

    // Queued data is still delivered before the disconnect.
    assert_eq!(consumer.receive().unwrap(), Some(b"last".to_vec()));
    assert_eq!(consumer.receive(), Err(QueueError::Disconnected));
    assert_eq!(consumer.receive_blocking(), Err(QueueError::Disconnected));
}

#[test]
fn send_batch_stops_at_first_overflow() {
    let (producer, consumer) = QueueBuilder::new()
        .with_bucket_capacity(10)
        .with_max_buckets(2)
        .build()
        .unwrap();

    let msg: &[u8] = b"aabbccdd";
    let accepted = producer.send_batch(&[msg, msg, msg, b"x" as &[u8]]);
    assert_eq!(accepted, 2);
    assert_eq!(consumer.len(), 2);
    assert_eq!(producer.send(msg), Err(QueueError::OverflowQueue));
}

#[test]
fn receive_timeout_expires_on_empty_queue() {
    let (_producer, consumer) = QueueBuilder::new()
        .with_bucket_capacity(64)
        .build()
        .unwrap();

    let start = Instant::now();
    let got = consumer.receive_timeout(Duration::from_millis(20)).unwrap();
    assert_eq!(got, None);
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn receive_timeout_returns_late_message() {
    let (producer, consumer) = QueueBuilder::new()
        .with_bucket_capacity(64)
        .build()
        .unwrap();

    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(5));
        producer.send("late").unwrap();
        producer
    });

    let got = consumer.receive_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(got, Some(b"late".to_vec()));
    drop(sender.join().unwrap());
}

#[test]
fn blocking_consumers_drain_until_producers_leave() {
    let (producer, consumer) = QueueBuilder::new()
        .with_bucket_capacity(4096)
        .with_max_buckets(4)
        .build()
        .unwrap();

    let producers = 3;
    let per_producer = 5_000;
    let mut senders = Vec::new();
    for id in 0..producers {
        let producer = producer.clone();
        senders.push(thread::spawn(move || {
            for i in 0..per_producer {
                let msg = format!("{{{{{id}:{i}}}}}");
                while producer.send(&msg).is_err() {
                    thread::yield_now();
                }
            }
        }));
    }
    drop(producer);

    let mut receivers = Vec::new();
    for _ in 0..2 {
        let consumer = consumer.clone();
        receivers.push(thread::spawn(move || {
            let mut got = 0usize;
            loop {
                match consumer.receive_blocking() {
                    Ok(data) => {
                        assert!(data.starts_with(b"{{") && data.ends_with(b"}}"));
                        got += 1;
                    }
                    Err(QueueError::Disconnected) => return got,
                    Err(err) => panic!("unexpected receive error: {err}"),
                }
            }
        }));
    }

    for s in senders {
        s.join().unwrap();
    }
    let total: usize = receivers.into_iter().map(|r| r.join().unwrap()).sum();
    assert_eq!(total, producers * per_producer);
    assert!(consumer.is_empty());
}

#[test]
fn channel_over_single_buffer_queue() {
    let queue = Arc::new(BigQueue::new(16, 0));
    let (producer, consumer) = channel(queue.clone());

    for i in 0..100u32 {
        producer.send(i.to_be_bytes()).unwrap();
    }
    assert_eq!(BytesQueue::len(queue.as_ref()), 100);

    for i in 0..100u32 {
        assert_eq!(consumer.receive().unwrap(), Some(i.to_be_bytes().to_vec()));
    }
    assert!(consumer.queue().is_empty());
}
