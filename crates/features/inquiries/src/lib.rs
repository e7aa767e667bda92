//! Inquiries slice: sourcing requests for items outside the catalog and price quotes
//! customers can track by reference number.

mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod repository;

pub use crate::error::{InquiryError, InquiryErrorExt};
pub use crate::repository::{ProductRequestRepository, QuoteRequestRepository};

use atelier_database::{Database, Migration};
use atelier_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("inquiries", "0001", include_str!("../migrations/0001_inquiries.surql"))];

/// Inquiries feature state
#[atelier_derive::atelier_slice]
pub struct Inquiries {
    pub product_requests: ProductRequestRepository,
    pub quotes: QuoteRequestRepository,
}

/// Initialize the inquiries feature.
#[must_use]
pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Inquiries slice initialized");
    InitializedSlice::new(Inquiries::new(InquiriesInner {
        product_requests: ProductRequestRepository::new(db),
        quotes: QuoteRequestRepository::new(db),
    }))
}

/// Routes served by this slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<atelier_kernel::server::ApiState> {
    use handlers::{product_requests, quote_requests};
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(product_requests::submit_product_request))
        .routes(routes!(product_requests::list_product_requests))
        .routes(routes!(
            product_requests::get_product_request,
            product_requests::update_product_request,
            product_requests::delete_product_request
        ))
        .routes(routes!(quote_requests::submit_quote_request))
        .routes(routes!(quote_requests::track_quote_request))
        .routes(routes!(quote_requests::list_quote_requests))
        .routes(routes!(
            quote_requests::get_quote_request,
            quote_requests::update_quote_request,
            quote_requests::delete_quote_request
        ))
}
