mod entry;
mod event_core;

pub(crate) use entry::Entry;
pub(crate) use event_core::{Detach, EventCore};
