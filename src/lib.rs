//! Hookline - thread-safe delegates and events
//!
//! Two small callback primitives for in-process notification:
//!
//! - [`Delegate`]: a single replaceable handler slot. Invoking an empty
//!   delegate is a no-op.
//! - [`event`]: a multi-subscriber event split into a [`Reader`] (subscribe)
//!   and an [`Emitter`] (emit). Every subscription returns a [`Subscription`]
//!   that cancels exactly that handler.
//!
//! Handlers take zero to four arguments. The argument set is one type
//! parameter: `()`, `T`, `(A, B)`, `(A, B, C)` or `(A, B, C, D)`.
//!
//! Everything runs synchronously on the calling thread; no task or thread
//! is ever spawned. Locks are held only while copying or editing the
//! handler list, never while a handler runs, so handlers may subscribe,
//! unsubscribe or emit on the same event.
//!
//! See `demos/event_unsubscribe.rs` and `demos/readonly_invoker.rs`.

mod action;
mod capability;
mod compaction;
mod config;
mod delegate;
mod error;
mod event;
mod subscriber_id;
mod subscription;

mod internal;

pub use action::{Action, combine, isolate};
pub use capability::{EventSink, EventSource, Invoker};
pub use compaction::Compaction;
pub use config::Config;
pub use delegate::Delegate;
pub use error::Error;
pub use event::{Emitter, Reader, event, event_with_config};
pub use subscriber_id::SubscriberId;
pub use subscription::{Subscription, SubscriptionGuard};

pub type Result<T = ()> = std::result::Result<T, Error>;
