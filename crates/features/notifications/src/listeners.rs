use crate::Notifications;
use crate::error::NotificationError;
use crate::mail;
use crate::model::SmsStatus;
use atelier_event_bus::{EventBus, EventBusError, spawn_listener};
use atelier_kernel::domain::events::{ContactSubmitted, ProductRequested, QuoteRequested, QuoteUpdated};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Status that triggers the quote-sent email.
const QUOTED: &str = "quoted";

/// Starts one background listener per notification. Each runs until the bus shuts down;
/// failures are logged by the listener and never reach the publisher.
///
/// # Errors
/// Fails only if a subscription cannot be created.
pub fn spawn_listeners(
    bus: &EventBus,
    notifications: &Notifications,
) -> Result<Vec<JoinHandle<()>>, EventBusError> {
    let mut tasks = Vec::with_capacity(6);

    let n = notifications.clone();
    tasks.push(spawn_listener(bus, "quote-confirmation", move |event: Arc<QuoteRequested>| {
        let n = n.clone();
        async move {
            let email = mail::quote_confirmation(&n.settings.storefront, &event);
            n.mailer.send(&email).await
        }
    })?);

    let n = notifications.clone();
    tasks.push(spawn_listener(bus, "quote-admin-alert", move |event: Arc<QuoteRequested>| {
        let n = n.clone();
        async move {
            let Some(admin) = n.settings.admin_email.as_deref() else { return Ok(()) };
            n.mailer.send(&mail::admin_alert(&n.settings.storefront, admin, &event)).await
        }
    })?);

    let n = notifications.clone();
    tasks.push(spawn_listener(bus, "quote-admin-sms", move |event: Arc<QuoteRequested>| {
        let n = n.clone();
        async move {
            let Some(phone) = n.settings.admin_phone.as_deref() else { return Ok(()) };
            let log = n.attempt(phone, &mail::quote_alert_sms(&event)).await?;
            match log.status {
                SmsStatus::Sent => Ok(()),
                _ => Err(NotificationError::provider(
                    log.error.unwrap_or_else(|| log.status.to_string()),
                    "admin-sms",
                )),
            }
        }
    })?);

    let n = notifications.clone();
    tasks.push(spawn_listener(bus, "quote-sent", move |event: Arc<QuoteUpdated>| {
        let n = n.clone();
        async move {
            if event.status != QUOTED {
                return Ok(());
            }
            n.mailer.send(&mail::quote_sent(&n.settings.storefront, &event)).await
        }
    })?);

    let n = notifications.clone();
    tasks.push(spawn_listener(bus, "product-request-alert", move |event: Arc<ProductRequested>| {
        let n = n.clone();
        async move {
            let Some(admin) = n.settings.admin_email.as_deref() else { return Ok(()) };
            n.mailer.send(&mail::product_request_alert(&n.settings.storefront, admin, &event)).await
        }
    })?);

    let n = notifications.clone();
    tasks.push(spawn_listener(bus, "contact-alert", move |event: Arc<ContactSubmitted>| {
        let n = n.clone();
        async move {
            let Some(admin) = n.settings.admin_email.as_deref() else { return Ok(()) };
            n.mailer.send(&mail::contact_alert(&n.settings.storefront, admin, &event)).await
        }
    })?);

    Ok(tasks)
}
