use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use super::Entry;
use crate::{
    Action, Config, SubscriberId, Subscription,
    action::{call_all, try_call_all},
};

/// Type-erased view of an event core used by [`Subscription`].
///
/// Lets a non-generic subscription handle cancel its entry without knowing
/// the event's argument type.
pub(crate) trait Detach: Send + Sync {
    /// Tombstones the entry with the given id. Returns `false` if no live
    /// entry had that id.
    fn detach(&self, id: SubscriberId) -> bool;

    fn label(&self) -> &str;
}

struct State<Args> {
    next_id: u64,
    /// Sorted by id: ids only grow and compaction keeps relative order.
    entries: Vec<Entry<Args>>,
    tombstones: usize,
}

impl<Args> State<Args> {
    fn live(&self) -> usize {
        self.entries.len() - self.tombstones
    }
}

/// Shared state behind a `Reader`/`Emitter` pair.
///
/// The lock is held only to mutate the entry list or to copy the live
/// actions out of it; handlers are always called with no lock held, so they
/// may freely subscribe, unsubscribe, or emit on this same event.
pub(crate) struct EventCore<Args> {
    config: Config,
    state: RwLock<State<Args>>,
}

impl<Args> EventCore<Args> {
    pub fn new(config: Config) -> Self {
        let entries = Vec::with_capacity(config.initial_capacity);
        Self {
            config,
            state: RwLock::new(State {
                next_id: 0,
                entries,
                tombstones: 0,
            }),
        }
    }

    // Handlers never run under the lock, so poisoning can only come from a
    // panic inside this module's own bookkeeping, which leaves `State`
    // consistent. Recover instead of propagating the poison.
    fn read(&self) -> RwLockReadGuard<'_, State<Args>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<Args>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copies the live actions in subscription order.
    pub fn snapshot(&self) -> Vec<Action<Args>> {
        let state = self.read();
        let mut snapshot = Vec::with_capacity(state.live());
        snapshot.extend(state.entries.iter().filter_map(|e| e.action.clone()));
        snapshot
    }

    pub fn has_subscribers(&self) -> bool {
        self.read().entries.iter().any(Entry::is_live)
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().live()
    }
}

impl<Args: Clone> EventCore<Args> {
    pub fn emit(&self, args: Args) {
        let snapshot = self.snapshot();
        tracing::trace!(
            event = %self.config.label,
            handlers = snapshot.len(),
            "Emitting event"
        );
        call_all(&snapshot, args);
    }

    pub fn try_emit(&self, args: Args) -> crate::Result {
        let snapshot = self.snapshot();
        tracing::trace!(
            event = %self.config.label,
            handlers = snapshot.len(),
            "Emitting event"
        );
        try_call_all(&snapshot, args)
    }
}

impl<Args: 'static> EventCore<Args> {
    pub fn subscribe(self: &Arc<Self>, action: Option<Action<Args>>) -> Subscription {
        let Some(action) = action else {
            return Subscription::noop();
        };

        let id = {
            let mut state = self.write();
            let id = SubscriberId::new(state.next_id);
            state.next_id += 1;
            state.entries.push(Entry::new(id, action));
            if self
                .config
                .compaction
                .should_compact(state.tombstones, state.live())
            {
                let removed = state.tombstones;
                state.entries.retain(Entry::is_live);
                state.tombstones = 0;
                tracing::trace!(event = %self.config.label, removed, "Compacted subscribers");
            }
            id
        };

        tracing::trace!(event = %self.config.label, subscriber_id = %id, "Subscribed");
        let core: Weak<dyn Detach> = Arc::downgrade(self) as Weak<dyn Detach>;
        Subscription::new(core, id)
    }
}

impl<Args: 'static> Detach for EventCore<Args> {
    fn detach(&self, id: SubscriberId) -> bool {
        let removed = {
            let mut state = self.write();
            let removed = match state.entries.binary_search_by_key(&id, |e| e.id) {
                Ok(index) => state.entries[index].tombstone(),
                Err(_) => None,
            };
            if removed.is_some() {
                state.tombstones += 1;
            }
            removed
        };

        // The handler's captures are dropped here, after the lock is
        // released: dropping one may unsubscribe from this same event.
        let Some(action) = removed else {
            return false;
        };
        drop(action);
        tracing::trace!(event = %self.config.label, subscriber_id = %id, "Unsubscribed");
        true
    }

    fn label(&self) -> &str {
        &self.config.label
    }
}
