use atelier_database::DatabaseError;
use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum CatalogError {
    /// Curation lists naming duplicate or unknown products.
    #[status(400)]
    #[error("{message}")]
    InvalidSelection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(404)]
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(409)]
    #[error("{message}")]
    DuplicateSku { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Catalog storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn product_not_found(id: &str) -> Self {
        Self::NotFound { message: format!("Product '{id}' not found").into(), context: None }
    }

    /// Maps unique-index collisions on `sku` to [`CatalogError::DuplicateSku`].
    pub(crate) fn from_write(source: DatabaseError, sku: &str) -> Self {
        if source.is_conflict() {
            Self::DuplicateSku {
                message: format!("A product with SKU '{sku}' already exists").into(),
                context: None,
            }
        } else {
            Self::Database { source, context: Some("Saving product".into()) }
        }
    }
}
