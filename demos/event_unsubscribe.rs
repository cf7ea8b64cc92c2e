use hookline::{Config, event_with_config};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let (on_value, emit_value) = event_with_config::<i32>(Config::default().with_label("value"));

    let first = on_value.subscribe(|v| println!("sub1: {v}"));
    on_value.subscribe(|v| println!("sub2: {v}"));

    emit_value.emit(10);
    first.unsubscribe();
    emit_value.emit(20);
}
