use atelier_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`NavigationError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum NavigationError {
    #[status(404)]
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Navigation storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal navigation error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl NavigationError {
    pub(crate) fn menu_not_found(name: &str) -> Self {
        Self::NotFound { message: format!("Menu '{name}' not found").into(), context: None }
    }
}
