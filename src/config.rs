use std::sync::Arc;

use crate::Compaction;

/// Per-event configuration.
///
/// Use the builder methods to customize, or [`Default`] for sensible defaults.
///
/// # Examples
///
/// ```rust
/// use hookline::{Compaction, Config};
///
/// let config = Config::default()
///     .with_label("on_ready")                 // Shows up in log fields
///     .with_initial_capacity(8)               // Expected number of subscribers
///     .with_compaction(Compaction::Never);    // Keep tombstones
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the event, recorded as the `event` field of every log line.
    /// Default: "event"
    pub label: Arc<str>,

    /// Number of subscriber slots allocated up front.
    /// Default: 0
    pub initial_capacity: usize,

    /// When cancelled entries are physically removed.
    /// Default: [`Compaction::Threshold(64)`](Compaction::Threshold)
    pub compaction: Compaction,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            label: Arc::from("event"),
            initial_capacity: 0,
            compaction: Compaction::default(),
        }
    }
}

impl Config {
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the tombstone compaction policy.
    ///
    /// Tombstones cost one slot each and are skipped while building every
    /// snapshot. Events with heavy subscribe/unsubscribe churn benefit from a
    /// low threshold; events whose subscribers rarely change can use
    /// [`Compaction::Never`].
    pub fn with_compaction(mut self, compaction: Compaction) -> Self {
        self.compaction = compaction;
        self
    }
}
