//! Catalog slice: products and the two curated lists built from them (popup products and
//! sale items).
//!
//! Curated lists store product ids only. Public reads resolve them to products in list
//! order and silently drop ids whose product has since been deleted.

mod curation;
mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod repository;

pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::repository::{Curation, CurationRepository, ProductRepository};

use atelier_database::{Database, Migration};
use atelier_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("catalog", "0001", include_str!("../migrations/0001_catalog.surql"))];

/// Catalog feature state
#[atelier_derive::atelier_slice]
pub struct Catalog {
    pub products: ProductRepository,
    pub popup: CurationRepository,
    pub sale_items: CurationRepository,
}

/// Initialize the catalog feature.
#[must_use]
pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Catalog slice initialized");
    InitializedSlice::new(Catalog::new(CatalogInner {
        products: ProductRepository::new(db),
        popup: CurationRepository::new(db, Curation::Popup),
        sale_items: CurationRepository::new(db, Curation::SaleItems),
    }))
}

/// Routes served by this slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<atelier_kernel::server::ApiState> {
    use handlers::{curation, products};
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(products::list_products))
        .routes(routes!(products::get_product))
        .routes(routes!(products::create_product))
        .routes(routes!(products::replace_product, products::delete_product))
        .routes(routes!(curation::popup_products))
        .routes(routes!(curation::sale_items))
        .routes(routes!(curation::get_popup_selection, curation::put_popup_selection))
        .routes(routes!(curation::get_sale_selection, curation::put_sale_selection))
}
