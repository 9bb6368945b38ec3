use std::borrow::Cow;

/// Waiting list error type.
#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    #[error("Validation error: {message}")]
    Validation { message: Cow<'static, str> },
    #[error("Not found: {what}")]
    NotFound { what: Cow<'static, str> },
    #[cfg(feature = "server")]
    #[error(transparent)]
    Database(#[from] whub_database::DatabaseError),
    #[cfg(feature = "server")]
    #[error(transparent)]
    Events(#[from] whub_event_bus::EventBusError),
}

impl WaitlistError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub(crate) fn not_found(what: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
