use atelier_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`ContactError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum ContactError {
    #[status(404)]
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Contact storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal contact error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContactError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { message: format!("Contact submission '{id}' not found").into(), context: None }
    }
}
