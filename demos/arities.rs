use hookline::{Action, Delegate, combine, event, isolate};

fn main() {
    tracing_subscriber::fmt().init();

    let (on_move, emit_move) = event::<(i32, i32)>();
    on_move.subscribe(|(x, y)| println!("moved to ({x}, {y})"));
    emit_move.emit((3, 4));

    let (on_hit, emit_hit) = event::<(String, u32, bool)>();
    on_hit.subscribe(|(target, damage, critical)| {
        println!("{target} took {damage} damage (critical: {critical})")
    });
    // A panicking handler is logged and does not stop the ones after it.
    on_hit.subscribe_action(Some(isolate(
        "flaky",
        Action::new(|_: (String, u32, bool)| panic!("flaky handler")),
    )));
    on_hit.subscribe(|(target, _, _)| println!("{target} still notified"));
    emit_hit.emit(("orc".to_string(), 12, true));

    let (on_rect, emit_rect) = event::<(u32, u32, u32, u32)>();
    if !on_rect.has_subscribers() {
        println!("nobody listens to rects yet");
    }
    let sub = on_rect.subscribe(|(x, y, w, h)| println!("rect {x},{y} {w}x{h}"));
    emit_rect.emit((0, 0, 640, 480));
    sub.unsubscribe();

    let log = Delegate::<&'static str>::new();
    log.set_action(Some(combine([
        Some(Action::new(|msg: &'static str| println!("stdout: {msg}"))),
        None,
        Some(Action::new(|msg: &'static str| eprintln!("stderr: {msg}"))),
    ])));
    log.invoke("combined");
}
