use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A handler panicked during `try_emit` or `try_invoke`.
    ///
    /// `position` is the handler's index within the emitted snapshot
    /// (always `0` for a delegate). Handlers after it were not called.
    #[error("Handler #{position} panicked: {message}")]
    HandlerPanicked { position: usize, message: Arc<str> },
}
