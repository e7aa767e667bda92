//! Contact slice: the public contact form and the back-office inbox behind it.

mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod repository;

pub use crate::error::{ContactError, ContactErrorExt};
pub use crate::repository::SubmissionRepository;

use atelier_database::{Database, Migration};
use atelier_kernel::domain::registry::InitializedSlice;

/// Schema scripts owned by this slice.
pub const MIGRATIONS: &[Migration] = &[Migration::new(
    "contact",
    "0001",
    include_str!("../migrations/0001_contact_submission.surql"),
)];

/// Contact feature state
#[atelier_derive::atelier_slice]
pub struct Contact {
    pub submissions: SubmissionRepository,
}

/// Initialize the contact feature.
#[must_use]
pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Contact slice initialized");
    InitializedSlice::new(Contact::new(ContactInner { submissions: SubmissionRepository::new(db) }))
}

/// Routes served by this slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<atelier_kernel::server::ApiState> {
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(handlers::submit_contact))
        .routes(routes!(handlers::list_submissions))
        .routes(routes!(
            handlers::get_submission,
            handlers::update_submission_status,
            handlers::delete_submission
        ))
}
