use atelier_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`ContentError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum ContentError {
    #[status(404)]
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Content storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal content error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContentError {
    pub(crate) fn not_found(what: &str, id: &str) -> Self {
        Self::NotFound { message: format!("{what} '{id}' not found").into(), context: None }
    }
}
