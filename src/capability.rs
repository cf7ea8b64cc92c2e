//! Narrow capability traits.
//!
//! Owners hand out trait objects instead of the concrete types so that a
//! consumer can only do what the trait allows: an [`Invoker`] cannot replace
//! the delegate's handler, an [`EventSource`] cannot emit, an [`EventSink`]
//! cannot subscribe.

use crate::{Action, Subscription};

/// Call-only view of a single-slot callback.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use hookline::{Delegate, Invoker};
///
/// struct Worker {
///     on_done: Arc<dyn Invoker<u32>>,
/// }
///
/// let delegate = Arc::new(Delegate::new());
/// delegate.set(|n: u32| println!("done with {n}"));
/// let worker = Worker { on_done: delegate.clone() };
/// worker.on_done.invoke(100);
/// ```
pub trait Invoker<Args>: Send + Sync {
    fn invoke(&self, args: Args);
}

/// Subscribe-only view of an event.
pub trait EventSource<Args>: Send + Sync {
    /// Registers an optional action. `None` yields a no-op [`Subscription`].
    fn subscribe_action(&self, action: Option<Action<Args>>) -> Subscription;

    /// Returns `true` if at least one handler is currently subscribed.
    fn has_subscribers(&self) -> bool;

    fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(Args) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_action(Some(Action::new(handler)))
    }
}

/// Emit-only view of an event.
pub trait EventSink<Args>: Send + Sync {
    fn emit(&self, args: Args);
}

impl<Args, T: Invoker<Args> + ?Sized> Invoker<Args> for std::sync::Arc<T> {
    fn invoke(&self, args: Args) {
        (**self).invoke(args)
    }
}

impl<Args, T: EventSink<Args> + ?Sized> EventSink<Args> for std::sync::Arc<T> {
    fn emit(&self, args: Args) {
        (**self).emit(args)
    }
}
