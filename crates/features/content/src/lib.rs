//! Content slice: keyed site copy, hero banners, homepage sections and the signup popup.
//!
//! Public reads only ever return active documents; the admin routes see everything.

mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod repository;

pub use crate::error::{ContentError, ContentErrorExt};
pub use crate::repository::{BlockRepository, HeroRepository, HomepageRepository, PopupRepository};

use atelier_database::{Database, Migration};
use atelier_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("content", "0001", include_str!("../migrations/0001_content.surql"))];

/// Content feature state
#[atelier_derive::atelier_slice]
pub struct Content {
    pub blocks: BlockRepository,
    pub heroes: HeroRepository,
    pub homepage: HomepageRepository,
    pub popup: PopupRepository,
}

/// Initialize the content feature.
#[must_use]
pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Content slice initialized");
    InitializedSlice::new(Content::new(ContentInner {
        blocks: BlockRepository::new(db),
        heroes: HeroRepository::new(db),
        homepage: HomepageRepository::new(db),
        popup: PopupRepository::new(db),
    }))
}

/// Routes served by this slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<atelier_kernel::server::ApiState> {
    use handlers::{block, hero, homepage, popup};
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(block::list_active_blocks))
        .routes(routes!(block::get_active_block))
        .routes(routes!(block::list_blocks))
        .routes(routes!(block::put_block, block::delete_block))
        .routes(routes!(hero::list_active_heroes))
        .routes(routes!(hero::list_heroes, hero::create_hero))
        .routes(routes!(hero::replace_hero, hero::delete_hero))
        .routes(routes!(homepage::list_active_sections))
        .routes(routes!(homepage::get_active_section))
        .routes(routes!(homepage::list_sections))
        .routes(routes!(homepage::put_section, homepage::delete_section))
        .routes(routes!(popup::get_signup_popup))
        .routes(routes!(popup::put_signup_popup))
}
