//! Notifications slice: outbound SMS and email.
//!
//! SMS goes through phone normalisation, a per-recipient fixed-window limit and the
//! configured [`SmsProvider`]; every attempt is recorded as an [`model::SmsLog`]. Email is
//! composed from domain events by background listeners (see [`spawn_listeners`]) and handed
//! to the configured [`Mailer`]. With a channel disabled, messages are only logged.

mod error;
#[cfg(feature = "server")]
mod handlers;
mod limiter;
mod listeners;
pub mod mail;
pub mod model;
pub mod phone;
mod repository;
mod service;
pub mod sms;

pub use crate::error::{NotificationError, NotificationErrorExt};
pub use crate::limiter::RateLimiter;
pub use crate::listeners::spawn_listeners;
pub use crate::mail::{Email, Mailer};
pub use crate::repository::SmsLogRepository;
pub use crate::sms::{SmsProvider, SmsReceipt};

use atelier_database::{Database, Migration};
use atelier_kernel::domain::config::{ApiConfig, StorefrontConfig};
use atelier_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;
use tracing::info;

pub const MIGRATIONS: &[Migration] =
    &[Migration::new("notifications", "0001", include_str!("../migrations/0001_sms_log.surql"))];

/// Limits and recipients resolved from configuration.
#[derive(Debug, Clone)]
pub struct NotificationSettings {
    pub max_body_chars: usize,
    pub max_bulk_recipients: usize,
    pub admin_email: Option<String>,
    /// Normalised.
    pub admin_phone: Option<String>,
    pub storefront: StorefrontConfig,
}

/// Notifications feature state
#[atelier_derive::atelier_slice]
pub struct Notifications {
    pub sms: Arc<dyn SmsProvider>,
    pub mailer: Arc<dyn Mailer>,
    pub limiter: RateLimiter,
    pub logs: SmsLogRepository,
    pub settings: NotificationSettings,
}

/// Builds providers from `notifications.*`.
///
/// # Errors
/// [`NotificationError::Config`] when an enabled channel lacks credentials, or the admin
/// phone is not a valid number.
pub fn build(config: &ApiConfig, db: &Database) -> Result<Notifications, NotificationError> {
    let cfg = &config.notifications;

    let sms: Arc<dyn SmsProvider> = if cfg.sms.enabled {
        Arc::new(sms::TwilioProvider::from_config(&cfg.sms)?)
    } else {
        Arc::new(sms::LogSmsProvider)
    };
    let mailer: Arc<dyn Mailer> = if cfg.mail.enabled {
        Arc::new(mail::HttpMailer::from_config(&cfg.mail)?)
    } else {
        Arc::new(mail::LogMailer)
    };
    let admin_phone = cfg
        .admin_phone
        .as_deref()
        .filter(|phone| !phone.trim().is_empty())
        .map(phone::normalize)
        .transpose()
        .map_err(|_| NotificationError::config("notifications.admin_phone is not a valid phone number"))?;

    Ok(Notifications::new(NotificationsInner {
        sms,
        mailer,
        limiter: RateLimiter::new(&cfg.sms.rate_limit),
        logs: SmsLogRepository::new(db),
        settings: NotificationSettings {
            max_body_chars: cfg.sms.max_body_chars,
            max_bulk_recipients: cfg.sms.max_bulk_recipients,
            admin_email: cfg.admin_email.clone().filter(|email| !email.trim().is_empty()),
            admin_phone,
            storefront: config.storefront.clone(),
        },
    }))
}

/// Initialize the notifications feature.
///
/// # Errors
/// See [`build`].
pub fn init(config: &ApiConfig, db: &Database) -> Result<InitializedSlice, NotificationError> {
    let slice = build(config, db)?;
    info!(sms = slice.sms.name(), mail = slice.mailer.name(), "Notifications slice initialized");
    Ok(InitializedSlice::new(slice))
}

/// Routes served by this slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<atelier_kernel::server::ApiState> {
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(handlers::send_sms))
        .routes(routes!(handlers::send_bulk_sms))
        .routes(routes!(handlers::list_sms_logs))
}
