use std::fmt;

/// Identity of one subscriber entry within a single event.
///
/// Ids are assigned from a counter at subscribe time and are never reused
/// for the lifetime of the event, so a stale [`Subscription`] can never
/// cancel somebody else's handler. Ids from different events are unrelated.
///
/// [`Subscription`]: crate::Subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
