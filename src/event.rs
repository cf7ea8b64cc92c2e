use std::{fmt, sync::Arc};

use crate::{Action, Config, EventSink, EventSource, Subscription, internal::EventCore};

/// Creates an event and returns its subscribe side and its emit side.
///
/// Keep the [`Emitter`] and hand the [`Reader`] to whoever should be able
/// to listen. Both sides can be cloned freely; the event lives as long as
/// any `Reader` or `Emitter` clone does.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// let (on_value, emit_value) = hookline::event::<i32>();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let s1 = seen.clone();
/// let first = on_value.subscribe(move |v| s1.lock().unwrap().push(v));
/// let s2 = seen.clone();
/// on_value.subscribe(move |v| s2.lock().unwrap().push(v * 2));
///
/// emit_value.emit(5);
/// first.unsubscribe();
/// emit_value.emit(7);
///
/// assert_eq!(*seen.lock().unwrap(), vec![5, 10, 14]);
/// ```
pub fn event<Args: Clone + 'static>() -> (Reader<Args>, Emitter<Args>) {
    event_with_config(Config::default())
}

/// Like [`event`], with a custom [`Config`].
pub fn event_with_config<Args: Clone + 'static>(config: Config) -> (Reader<Args>, Emitter<Args>) {
    let core = Arc::new(EventCore::new(config));
    (
        Reader { core: core.clone() },
        Emitter { core },
    )
}

/// The subscribe side of an event.
///
/// Anyone holding a `Reader` can register handlers, but cannot trigger them.
pub struct Reader<Args> {
    core: Arc<EventCore<Args>>,
}

impl<Args: Clone + 'static> Reader<Args> {
    /// Registers `handler` for all future emissions.
    ///
    /// A subscription made while another thread is inside [`Emitter::emit`]
    /// may or may not be part of that emission; it is part of every emission
    /// that starts after `subscribe` returns.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        self.core.subscribe(Some(Action::new(handler)))
    }

    /// Registers an optional action. `None` registers nothing and returns a
    /// no-op [`Subscription`].
    pub fn subscribe_action(&self, action: Option<Action<Args>>) -> Subscription {
        self.core.subscribe(action)
    }

    /// Returns `true` if at least one handler is currently subscribed.
    pub fn has_subscribers(&self) -> bool {
        self.core.has_subscribers()
    }

    /// Number of live handlers.
    pub fn subscriber_count(&self) -> usize {
        self.core.subscriber_count()
    }

    /// The event's name from [`Config::label`].
    pub fn label(&self) -> &str {
        &self.core.config().label
    }
}

impl<Args> Clone for Reader<Args> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<Args: Clone + 'static> EventSource<Args> for Reader<Args> {
    fn subscribe_action(&self, action: Option<Action<Args>>) -> Subscription {
        Reader::subscribe_action(self, action)
    }

    fn has_subscribers(&self) -> bool {
        Reader::has_subscribers(self)
    }
}

impl<Args> fmt::Debug for Reader<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("event", &self.core.config().label)
            .field("subscribers", &self.core.subscriber_count())
            .finish()
    }
}

/// The emit side of an event.
pub struct Emitter<Args> {
    core: Arc<EventCore<Args>>,
}

impl<Args: Clone + 'static> Emitter<Args> {
    /// Calls every live handler with a clone of `args`, in subscription
    /// order, on the current thread.
    ///
    /// The set of handlers is fixed when the call starts. Handlers added
    /// during the emission are not called until the next one; handlers
    /// removed during the emission still run in this one. Concurrent calls
    /// from several threads may interleave their handlers.
    ///
    /// A panicking handler unwinds out of `emit` and the handlers after it
    /// are skipped. Use [`try_emit`](Self::try_emit) to get an error instead,
    /// or wrap individual handlers with [`isolate`](crate::isolate).
    pub fn emit(&self, args: Args) {
        self.core.emit(args)
    }

    /// Like [`emit`](Self::emit), but stops at the first panicking handler
    /// and reports it as [`Error::HandlerPanicked`](crate::Error::HandlerPanicked).
    pub fn try_emit(&self, args: Args) -> crate::Result {
        self.core.try_emit(args)
    }

    /// Lets the owner skip building expensive arguments when nobody listens.
    pub fn has_subscribers(&self) -> bool {
        self.core.has_subscribers()
    }

    /// Returns a new subscribe side for this event.
    pub fn reader(&self) -> Reader<Args> {
        Reader {
            core: self.core.clone(),
        }
    }
}

impl<Args> Clone for Emitter<Args> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<Args: Clone + 'static> EventSink<Args> for Emitter<Args> {
    fn emit(&self, args: Args) {
        Emitter::emit(self, args)
    }
}

impl<Args> fmt::Debug for Emitter<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("event", &self.core.config().label)
            .finish()
    }
}
