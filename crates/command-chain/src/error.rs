use std::error::Error;

/// Boxed error accepted as the cause of a [`ListenerError`].
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Error raised by a [`CommandListener`](crate::CommandListener) notification.
///
/// Chains never propagate listener errors: they are passed to the chain's
/// [`ErrorLogger`](crate::ErrorLogger) and dropped.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ListenerError {
    /// Create an error with no underlying cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error caused by `source`.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Message without the source.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
