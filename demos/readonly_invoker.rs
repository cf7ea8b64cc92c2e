use std::sync::Arc;

use hookline::{Delegate, Invoker};

// The worker can report completion but cannot replace the handler.
struct Worker {
    on_done: Arc<dyn Invoker<u32>>,
}

impl Worker {
    fn new() -> Self {
        let delegate = Arc::new(Delegate::new());
        delegate.set(|n: u32| println!("done with {n}"));
        Worker { on_done: delegate }
    }

    fn run(&self, items: u32) {
        self.on_done.invoke(items);
    }
}

fn main() {
    let worker = Worker::new();
    worker.run(100);
}
