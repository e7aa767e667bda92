use atelier_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`InquiryError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum InquiryError {
    /// Status changes the request cannot take, such as quoting without a price.
    #[status(400)]
    #[error("{message}")]
    InvalidUpdate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(404)]
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Inquiry storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal inquiry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl InquiryError {
    pub(crate) fn product_request_not_found(id: &str) -> Self {
        Self::NotFound { message: format!("Product request '{id}' not found").into(), context: None }
    }

    pub(crate) fn quote_not_found(id: &str) -> Self {
        Self::NotFound { message: format!("Quote request '{id}' not found").into(), context: None }
    }

    /// Tracking never reveals whether the reference or the email was wrong.
    pub(crate) fn quote_not_tracked() -> Self {
        Self::NotFound { message: "No quote request matches this reference and email".into(), context: None }
    }

    pub(crate) fn invalid_update(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidUpdate { message: message.into(), context: None }
    }
}
