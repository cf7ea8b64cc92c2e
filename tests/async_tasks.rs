//! Using events from tokio tasks running on a multi-threaded runtime.

use hookline::event;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_emit_from_many_tasks() {
    let (reader, emitter) = event::<(u64, u64)>();
    let sum = Arc::new(AtomicU64::new(0));
    let s = sum.clone();
    let _sub = reader.subscribe(move |(a, b)| {
        s.fetch_add(a * b, Ordering::Relaxed);
    });

    let mut tasks = JoinSet::new();
    for task in 0..16u64 {
        let emitter = emitter.clone();
        tasks.spawn(async move {
            for _ in 0..10 {
                emitter.emit((task, 2));
                tokio::task::yield_now().await;
            }
        });
    }
    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }

    let expected: u64 = (0..16u64).map(|t| t * 2 * 10).sum();
    assert_eq!(sum.load(Ordering::Relaxed), expected);
}

#[tokio::test]
async fn test_handler_forwards_into_channel() {
    let (reader, emitter) = event::<String>();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let sub = reader.subscribe(move |msg| {
        let _ = tx.send(msg);
    });

    emitter.emit("hello".to_string());
    sub.unsubscribe();
    emitter.emit("dropped".to_string());

    assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    // unsubscribing dropped the handler and the sender it owned
    assert_eq!(rx.recv().await, None);
}
