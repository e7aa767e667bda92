//! Facade crate for Atelier features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Apply [`migrations`] before serving.
//! - Call [`init`] to build every slice and start the notification listeners.
//! - Merge [`server::router`] into the application router.

use atelier_database::{Database, Migration};
use atelier_domain::config::ApiConfig;
use atelier_domain::registry::InitializedSlice;
use atelier_event_bus::{EventBus, EventBusError};
use std::borrow::Cow;
use tokio::task::JoinHandle;
use tracing::info;

pub use atelier_domain as domain;
pub use atelier_kernel as kernel;

#[atelier_derive::atelier_error]
pub enum BootstrapError {
    #[error("Identity bootstrap failed{}: {source}", format_context(.context))]
    Identity { source: features::identity::IdentityError, context: Option<Cow<'static, str>> },

    #[error("Notifications bootstrap failed{}: {source}", format_context(.context))]
    Notifications {
        source: features::notifications::NotificationError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Event listeners failed to start{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use atelier_catalog as catalog;
    pub use atelier_contact as contact;
    pub use atelier_content as content;
    pub use atelier_identity as identity;
    pub use atelier_inquiries as inquiries;
    pub use atelier_navigation as navigation;
    pub use atelier_notifications as notifications;

    /// Slices compiled into this build.
    pub const ENABLED: &[&str] =
        &["identity", "contact", "content", "navigation", "catalog", "inquiries", "notifications"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema scripts of every slice, in dependency-free slice order.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    [
        features::contact::MIGRATIONS,
        features::content::MIGRATIONS,
        features::navigation::MIGRATIONS,
        features::catalog::MIGRATIONS,
        features::inquiries::MIGRATIONS,
        features::notifications::MIGRATIONS,
    ]
    .into_iter()
    .flatten()
    .cloned()
    .collect()
}

/// Slices ready for registration plus the background listener tasks.
#[derive(Debug)]
pub struct Platform {
    pub slices: Vec<InitializedSlice>,
    pub listeners: Vec<JoinHandle<()>>,
}

/// Initialize all features and subscribe the notification listeners to `events`.
///
/// # Errors
/// Returns an error if a slice rejects its configuration or a listener cannot subscribe.
pub fn init(config: &ApiConfig, database: &Database, events: &EventBus) -> Result<Platform, BootstrapError> {
    let notifications = features::notifications::build(config, database)?;
    let listeners = features::notifications::spawn_listeners(events, &notifications)?;

    let slices = vec![
        features::identity::init(config)?,
        features::contact::init(database),
        features::content::init(database),
        features::navigation::init(database),
        features::catalog::init(database),
        features::inquiries::init(database),
        InitializedSlice::new(notifications),
    ];

    info!(slices = slices.len(), listeners = listeners.len(), "Platform initialized");
    Ok(Platform { slices, listeners })
}

#[cfg(feature = "server")]
pub mod server {
    use atelier_kernel::server::ApiState;
    use utoipa_axum::router::OpenApiRouter;

    /// Platform routes plus every slice router.
    #[must_use]
    pub fn router() -> OpenApiRouter<ApiState> {
        OpenApiRouter::new()
            .merge(atelier_kernel::server::router::system_router())
            .merge(crate::features::contact::router())
            .merge(crate::features::content::router())
            .merge(crate::features::navigation::router())
            .merge(crate::features::catalog::router())
            .merge(crate::features::inquiries::router())
            .merge(crate::features::notifications::router())
    }
}
