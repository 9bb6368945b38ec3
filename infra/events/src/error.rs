/// Errors that can occur during event bus operations.
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    /// An internal dynamic cast failed. This usually indicates an invariant
    /// violation in the channel registry.
    #[error("Type mismatch for event channel `{event}`")]
    TypeMismatch { event: &'static str },

    /// Channel exists but with a different kind (broadcast vs. mpsc).
    #[error("Channel kind mismatch for `{event}`: expected {expected}, found {found}")]
    ChannelKindMismatch { event: &'static str, expected: &'static str, found: &'static str },

    /// The single consumer of an MPSC channel was already handed out.
    #[error("MPSC receiver for `{event}` was already taken")]
    ReceiverTaken { event: &'static str },

    /// A bounded channel is full and cannot accept more messages.
    #[error("Channel for `{event}` is full")]
    ChannelFull { event: &'static str },

    /// Capacity must be greater than zero for bounded channels.
    #[error("Invalid capacity: requested {requested}, minimum is {minimum}")]
    InvalidCapacity { requested: usize, minimum: usize },
}
