use std::{
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{SubscriberId, internal::Detach};

/// Cancellation handle for one handler registered on an event.
///
/// Returned by [`Reader::subscribe`](crate::Reader::subscribe). Dropping a
/// `Subscription` does **not** unsubscribe; the handler stays registered for
/// the lifetime of the event unless [`unsubscribe`](Self::unsubscribe) is
/// called. Use [`into_guard`](Self::into_guard) for scope-bound registration.
///
/// Clones refer to the same registration and share its one-shot guard.
///
/// A subscription keeps only a weak reference to its event, so a handler may
/// capture its own subscription without keeping the event alive.
#[derive(Clone)]
pub struct Subscription {
    inner: Option<Arc<Inner>>,
}

struct Inner {
    core: Weak<dyn Detach>,
    id: SubscriberId,
    cancelled: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(core: Weak<dyn Detach>, id: SubscriberId) -> Self {
        Self {
            inner: Some(Arc::new(Inner {
                core,
                id,
                cancelled: AtomicBool::new(false),
            })),
        }
    }

    /// A subscription bound to nothing. Unsubscribing it has no effect.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    /// Removes the handler from all future emissions.
    ///
    /// Only the first call has an effect; later calls, including concurrent
    /// ones from other threads and calls made while the removed handler is
    /// being dropped, return immediately. An emission that already took its
    /// snapshot still calls the handler.
    ///
    /// If dropping the removed handler panics, the panic reaches this first
    /// caller; the handler stays removed and later calls remain no-ops.
    pub fn unsubscribe(&self) {
        let Some(inner) = &self.inner else {
            return;
        };
        if inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        match inner.core.upgrade() {
            Some(core) => {
                core.detach(inner.id);
            }
            None => {
                tracing::debug!(subscriber_id = %inner.id, "Event already dropped");
            }
        }
    }

    /// Returns `true` until [`unsubscribe`](Self::unsubscribe) has been
    /// called. Always `false` for a no-op subscription.
    pub fn is_active(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|i| !i.cancelled.load(Ordering::Acquire))
    }

    /// The subscriber id, or `None` for a no-op subscription.
    pub fn id(&self) -> Option<SubscriberId> {
        self.inner.as_ref().map(|i| i.id)
    }

    /// Returns `true` if this subscription was never bound to a handler.
    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }

    /// Converts into a guard that unsubscribes when dropped.
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard {
            subscription: Some(self),
        }
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            None => f.write_str("Subscription(noop)"),
            Some(inner) => f
                .debug_struct("Subscription")
                .field("event", &inner.core.upgrade().map(|c| c.label().to_string()))
                .field("id", &inner.id)
                .field("active", &!inner.cancelled.load(Ordering::Acquire))
                .finish(),
        }
    }
}

/// Unsubscribes its [`Subscription`] when dropped.
#[derive(Debug)]
#[must_use = "dropping the guard unsubscribes immediately"]
pub struct SubscriptionGuard {
    subscription: Option<Subscription>,
}

impl SubscriptionGuard {
    /// Releases the subscription without unsubscribing it.
    pub fn disarm(mut self) -> Subscription {
        self.subscription.take().unwrap_or_default()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
