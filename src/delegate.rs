use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{PoisonError, RwLock},
};

use crate::{Action, Error, Invoker, action::panic_message};

/// A single replaceable callback slot.
///
/// `invoke` calls whatever handler is currently set, or does nothing if the
/// slot is empty. The handler is cloned out under a read lock and called
/// after the lock is released, so a slow or re-entrant handler never blocks
/// `set` or other invocations. An invocation that already picked up the old
/// handler finishes with it even if `set` runs concurrently.
///
/// To hand out call-only access, share the delegate as
/// `Arc<dyn Invoker<Args>>`.
///
/// # Example
///
/// ```rust
/// use hookline::Delegate;
///
/// let on_tick: Delegate<u64> = Delegate::new();
/// on_tick.invoke(1); // nothing set: no-op
///
/// on_tick.set(|n| println!("tick {n}"));
/// on_tick.invoke(2);
/// ```
pub struct Delegate<Args> {
    slot: RwLock<Option<Action<Args>>>,
}

impl<Args> Delegate<Args> {
    /// Creates an empty delegate.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Replaces the stored handler.
    pub fn set<F>(&self, handler: F)
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        self.set_action(Some(Action::new(handler)));
    }

    /// Replaces the stored handler; `None` empties the slot.
    pub fn set_action(&self, action: Option<Action<Args>>) {
        let previous = {
            let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, action)
        };
        // Dropped outside the lock: the old handler's captures may run
        // arbitrary Drop code.
        drop(previous);
    }

    /// Empties the slot; later invocations are no-ops until the next `set`.
    pub fn clear(&self) {
        self.set_action(None);
    }

    /// Returns `true` if a handler is currently stored.
    pub fn is_set(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<Action<Args>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Calls the stored handler, if any.
    ///
    /// A panic inside the handler unwinds into the caller.
    pub fn invoke(&self, args: Args) {
        if let Some(action) = self.current() {
            action.call(args);
        }
    }

    /// Like [`invoke`](Self::invoke), but reports a panicking handler as
    /// [`Error::HandlerPanicked`] instead of unwinding.
    pub fn try_invoke(&self, args: Args) -> crate::Result {
        let Some(action) = self.current() else {
            return Ok(());
        };
        catch_unwind(AssertUnwindSafe(|| action.call(args))).map_err(|payload| {
            Error::HandlerPanicked {
                position: 0,
                message: panic_message(payload.as_ref()),
            }
        })
    }
}

impl<Args> Default for Delegate<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Invoker<Args> for Delegate<Args> {
    fn invoke(&self, args: Args) {
        Delegate::invoke(self, args)
    }
}

impl<Args> fmt::Debug for Delegate<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("is_set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_empty_invoke_is_noop() {
        let d: Delegate<i32> = Delegate::new();
        assert!(!d.is_set());
        d.invoke(1);
        assert!(d.try_invoke(1).is_ok());
    }

    #[test]
    fn test_latest_set_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let d = Delegate::new();
        let (a, b) = (log.clone(), log.clone());
        d.set(move |v: i32| a.lock().unwrap().push(("a", v)));
        d.set(move |v: i32| b.lock().unwrap().push(("b", v)));
        d.invoke(1);
        assert_eq!(*log.lock().unwrap(), vec![("b", 1)]);
    }

    #[test]
    fn test_clear_empties_slot() {
        let count = Arc::new(AtomicUsize::new(0));
        let d = Delegate::new();
        let c = count.clone();
        d.set(move |_: ()| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        d.invoke(());
        d.clear();
        d.invoke(());
        assert!(!d.is_set());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_can_replace_itself() {
        let d: Arc<Delegate<()>> = Arc::new(Delegate::new());
        let count = Arc::new(AtomicUsize::new(0));
        let (inner, c) = (d.clone(), count.clone());
        d.set(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            inner.clear();
        });
        d.invoke(());
        d.invoke(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_try_invoke_reports_panic() {
        let d: Delegate<()> = Delegate::new();
        d.set(|_| panic!("delegate failed"));
        let err = d.try_invoke(()).unwrap_err();
        assert_eq!(err.to_string(), "Handler #0 panicked: delegate failed");
        // the slot survives the panic
        assert!(d.is_set());
    }

    #[test]
    fn test_invoker_view() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let d = Arc::new(Delegate::new());
        let l = log.clone();
        d.set(move |(a, b): (i32, i32)| l.lock().unwrap().push(a + b));

        let invoker: Arc<dyn Invoker<(i32, i32)>> = d.clone();
        invoker.invoke((2, 3));

        assert_eq!(*log.lock().unwrap(), vec![5]);
    }
}
