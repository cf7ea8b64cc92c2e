use std::{
    any::Any,
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use crate::Error;

/// A typed, cheaply clonable callback.
///
/// `Args` is the argument set the callback receives. Arities are expressed
/// through a single type:
///
/// | arity | `Args`         | handler              |
/// |-------|----------------|----------------------|
/// | 0     | `()`           | `\|()\| ...`         |
/// | 1     | `T`            | `\|v\| ...`          |
/// | 2     | `(A, B)`       | `\|(a, b)\| ...`     |
/// | 3     | `(A, B, C)`    | `\|(a, b, c)\| ...`  |
/// | 4     | `(A, B, C, D)` | `\|(a, b, c, d)\| ...` |
///
/// An absent action is written as `Option::<Action<Args>>::None`; every API
/// that accepts one treats `None` as "nothing to call".
pub struct Action<Args>(Arc<dyn Fn(Args) + Send + Sync>);

impl<Args> Action<Args> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, args: Args) {
        (self.0)(args)
    }
}

impl<Args> Clone for Action<Args> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Args> fmt::Debug for Action<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action")
            .field(&std::any::type_name::<Args>())
            .finish()
    }
}

/// Composes several actions into one that calls each present action in order.
///
/// Absent entries are skipped. The result holds no lock and no state beyond
/// the captured list, so it suits fixed fan-out that never changes after
/// construction.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use hookline::{Action, combine};
///
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let (a, b) = (log.clone(), log.clone());
/// let both = combine([
///     Some(Action::new(move |v: i32| a.lock().unwrap().push(v))),
///     None,
///     Some(Action::new(move |v: i32| b.lock().unwrap().push(v + 1))),
/// ]);
/// both.call(1);
/// assert_eq!(*log.lock().unwrap(), vec![1, 2]);
/// ```
pub fn combine<Args, I>(actions: I) -> Action<Args>
where
    Args: Clone + 'static,
    I: IntoIterator<Item = Option<Action<Args>>>,
{
    let list: Vec<Action<Args>> = actions.into_iter().flatten().collect();
    Action::new(move |args: Args| call_all(&list, args))
}

/// Wraps an action so that a panic inside it is caught and logged instead of
/// unwinding into the caller.
///
/// Events are fail-fast: a panicking handler stops the rest of the fan-out.
/// Subscribing isolated handlers gives all-handlers-run semantics for the
/// ones that opt in.
pub fn isolate<Args>(name: impl Into<Arc<str>>, action: Action<Args>) -> Action<Args>
where
    Args: 'static,
{
    let name = name.into();
    Action::new(move |args: Args| {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| action.call(args))) {
            tracing::error!(
                handler = %name,
                error = %panic_message(payload.as_ref()),
                "Isolated handler panicked"
            );
        }
    })
}

/// Calls every action in order, cloning `args` for all but the last one.
pub(crate) fn call_all<Args: Clone>(actions: &[Action<Args>], args: Args) {
    if let Some((last, rest)) = actions.split_last() {
        for action in rest {
            action.call(args.clone());
        }
        last.call(args);
    }
}

/// Like [`call_all`], but turns the first panic into an error and stops there.
pub(crate) fn try_call_all<Args: Clone>(actions: &[Action<Args>], args: Args) -> crate::Result {
    for (position, action) in actions.iter().enumerate() {
        let args = args.clone();
        catch_unwind(AssertUnwindSafe(|| action.call(args))).map_err(|payload| {
            Error::HandlerPanicked {
                position,
                message: panic_message(payload.as_ref()),
            }
        })?;
    }
    Ok(())
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Arc<str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Arc::from(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Arc::from(s.as_str())
    } else {
        Arc::from("unknown panic payload")
    }
}
