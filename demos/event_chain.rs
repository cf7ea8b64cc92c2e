use hookline::{Config, EventSource, Reader, event, event_with_config};

struct Service {
    on_ready: Reader<()>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let (on_a, emit_a) = event_with_config::<()>(Config::default().with_label("a"));
    let (on_b, emit_b) = event_with_config::<()>(Config::default().with_label("b"));

    // Forward A into B. The two events stay independent; the chain is
    // just a handler that happens to emit.
    on_a.subscribe(move |()| emit_b.emit(()));
    on_b.subscribe(|()| println!("B triggered"));

    emit_a.emit(());

    let (on_ready, fire_ready) = event::<()>();
    let service = Service { on_ready };
    // `subscribe` through the narrow trait works the same way
    EventSource::subscribe(&service.on_ready, |()| println!("service ready!"));
    fire_ready.emit(());
}
