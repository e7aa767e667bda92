//! Navigation slice: named menus and the storefront navbar with its mega menus.

mod error;
#[cfg(feature = "server")]
mod handlers;
pub mod model;
mod repository;

pub use crate::error::{NavigationError, NavigationErrorExt};
pub use crate::repository::{MenuRepository, NavbarRepository};

use atelier_database::{Database, Migration};
use atelier_kernel::domain::registry::InitializedSlice;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("navigation", "0001", include_str!("../migrations/0001_navigation.surql"))];

/// Navigation feature state
#[atelier_derive::atelier_slice]
pub struct Navigation {
    pub menus: MenuRepository,
    pub navbar: NavbarRepository,
}

/// Initialize the navigation feature.
#[must_use]
pub fn init(db: &Database) -> InitializedSlice {
    tracing::info!("Navigation slice initialized");
    InitializedSlice::new(Navigation::new(NavigationInner {
        menus: MenuRepository::new(db),
        navbar: NavbarRepository::new(db),
    }))
}

/// Routes served by this slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<atelier_kernel::server::ApiState> {
    use handlers::{menu, navbar};
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(menu::list_menus))
        .routes(routes!(menu::get_menu))
        .routes(routes!(menu::put_menu, menu::delete_menu))
        .routes(routes!(navbar::get_navbar))
        .routes(routes!(navbar::put_navbar))
}
