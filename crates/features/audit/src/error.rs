use std::borrow::Cow;

/// Audit error type.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Internal error: {message}")]
    Internal { message: Cow<'static, str> },
    #[cfg(feature = "server")]
    #[error(transparent)]
    Database(#[from] whub_database::DatabaseError),
    #[cfg(feature = "server")]
    #[error(transparent)]
    Events(#[from] whub_event_bus::EventBusError),
}
