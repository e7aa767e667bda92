use atelier_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`NotificationError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum NotificationError {
    #[status(400)]
    #[error("{message}")]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(429)]
    #[error("{message}")]
    RateLimited { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The SMS or mail provider rejected the request or could not be reached.
    #[status(502)]
    #[error("Provider failure{}: {message}", format_context(.context))]
    Provider { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Notification configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Notification storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal notification error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl NotificationError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn provider(message: impl Into<Cow<'static, str>>, provider: &'static str) -> Self {
        Self::Provider { message: message.into(), context: Some(provider.into()) }
    }

    pub(crate) fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config { message: message.into(), context: None }
    }

    /// Message without the variant prefix, for audit records.
    pub(crate) fn detail(&self) -> String {
        match self {
            Self::Provider { message, .. } | Self::Validation { message, .. } => message.to_string(),
            other => other.to_string(),
        }
    }
}
