use crate::{Action, SubscriberId};

/// One slot in an event's subscriber list.
///
/// `action` is `None` once the subscription was cancelled (a tombstone).
/// A tombstoned entry is never revived.
pub(crate) struct Entry<Args> {
    pub id: SubscriberId,
    pub action: Option<Action<Args>>,
}

impl<Args> Entry<Args> {
    pub fn new(id: SubscriberId, action: Action<Args>) -> Self {
        Self {
            id,
            action: Some(action),
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.action.is_some()
    }

    /// Clears the action and hands it back so the caller can drop it
    /// outside the lock. Returns `None` if it was already cleared.
    pub fn tombstone(&mut self) -> Option<Action<Args>> {
        self.action.take()
    }
}
