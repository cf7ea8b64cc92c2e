use std::fmt;

/// Policy for physically removing cancelled subscriber entries.
///
/// Unsubscribing only tombstones an entry; its slot stays in the list until
/// compaction drops it. Compaction runs during `subscribe`, never during
/// `emit`, and never changes the id or relative order of live entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compaction {
    /// Keep tombstones forever.
    Never,
    /// Compact once at least this many tombstones have accumulated and they
    /// outnumber the live entries.
    Threshold(usize),
}

impl Default for Compaction {
    fn default() -> Self {
        Compaction::Threshold(64)
    }
}

impl Compaction {
    pub fn is_never(&self) -> bool {
        matches!(self, Compaction::Never)
    }

    pub(crate) fn should_compact(&self, tombstones: usize, live: usize) -> bool {
        match self {
            Compaction::Never => false,
            Compaction::Threshold(min) => tombstones > 0 && tombstones >= *min && tombstones >= live,
        }
    }
}

impl fmt::Display for Compaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compaction::Never => write!(f, "Never"),
            Compaction::Threshold(n) => write!(f, "Threshold({n})"),
        }
    }
}
