//! Cross-thread behaviour under subscribe/unsubscribe/emit churn.

use hookline::{Compaction, Config, Delegate, Subscription, event, event_with_config};
use rand::Rng;
use std::sync::{
    Arc, Barrier, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::thread;

#[test]
fn test_concurrent_emits_reach_every_handler() {
    const THREADS: usize = 8;
    const EMITS: usize = 500;
    const HANDLERS: usize = 4;

    let (reader, emitter) = event::<usize>();
    let total = Arc::new(AtomicUsize::new(0));
    for _ in 0..HANDLERS {
        let t = total.clone();
        reader.subscribe(move |v| {
            t.fetch_add(v, Ordering::Relaxed);
        });
    }

    thread::scope(|s| {
        for _ in 0..THREADS {
            let emitter = emitter.clone();
            s.spawn(move || {
                for _ in 0..EMITS {
                    emitter.emit(1);
                }
            });
        }
    });

    assert_eq!(total.load(Ordering::Relaxed), THREADS * EMITS * HANDLERS);
}

#[test]
fn test_unsubscribed_handler_never_runs_afterwards() {
    let (reader, emitter) = event::<()>();
    let after_cancel = Arc::new(AtomicUsize::new(0));
    let cancelled = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let (a, c) = (after_cancel.clone(), cancelled.clone());
    let sub = reader.subscribe(move |_| {
        if c.load(Ordering::SeqCst) {
            a.fetch_add(1, Ordering::SeqCst);
        }
    });

    let barrier = Barrier::new(2);
    thread::scope(|s| {
        s.spawn(|| {
            barrier.wait();
            for _ in 0..1000 {
                emitter.emit(());
            }
        });
        s.spawn(|| {
            barrier.wait();
            sub.unsubscribe();
        });
    });

    // Every emission that starts after unsubscribe returned skips the handler.
    cancelled.store(true, Ordering::SeqCst);
    for _ in 0..100 {
        emitter.emit(());
    }
    assert_eq!(after_cancel.load(Ordering::SeqCst), 0);
}

#[test]
fn test_random_churn_keeps_counts_consistent() {
    const THREADS: usize = 6;
    const OPS: usize = 400;

    let (reader, emitter) = event_with_config::<u32>(
        Config::default()
            .with_label("churn")
            .with_compaction(Compaction::Threshold(4)),
    );
    let live = Arc::new(Mutex::new(Vec::<Subscription>::new()));

    thread::scope(|s| {
        for _ in 0..THREADS {
            let (reader, emitter, live) = (reader.clone(), emitter.clone(), live.clone());
            s.spawn(move || {
                let mut rng = rand::rng();
                for _ in 0..OPS {
                    match rng.random_range(0..3) {
                        0 => {
                            let sub = reader.subscribe(|v| {
                                std::hint::black_box(v);
                            });
                            live.lock().unwrap().push(sub);
                        }
                        1 => {
                            let victim = {
                                let mut subs = live.lock().unwrap();
                                if subs.is_empty() {
                                    None
                                } else {
                                    let i = rng.random_range(0..subs.len());
                                    Some(subs.swap_remove(i))
                                }
                            };
                            if let Some(sub) = victim {
                                sub.unsubscribe();
                            }
                        }
                        _ => emitter.emit(rng.random()),
                    }
                }
            });
        }
    });

    let remaining = live.lock().unwrap().len();
    assert_eq!(reader.subscriber_count(), remaining);
    assert_eq!(reader.has_subscribers(), remaining > 0);

    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    reader.subscribe(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    emitter.emit(0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_delegate_set_and_invoke_race() {
    let delegate: Arc<Delegate<usize>> = Arc::new(Delegate::new());
    let hits = Arc::new(AtomicUsize::new(0));

    thread::scope(|s| {
        for n in 0..4 {
            let (d, h) = (delegate.clone(), hits.clone());
            s.spawn(move || {
                for i in 0..200 {
                    if (i + n) % 2 == 0 {
                        let h = h.clone();
                        d.set(move |v| {
                            h.fetch_add(v, Ordering::Relaxed);
                        });
                    } else {
                        d.clear();
                    }
                }
            });
        }
        for _ in 0..4 {
            let d = delegate.clone();
            s.spawn(move || {
                for _ in 0..200 {
                    d.invoke(1);
                }
            });
        }
    });

    let before = hits.load(Ordering::Relaxed);
    let h = hits.clone();
    delegate.set(move |v| {
        h.fetch_add(v, Ordering::Relaxed);
    });
    delegate.invoke(10);
    assert_eq!(hits.load(Ordering::Relaxed), before + 10);
}
