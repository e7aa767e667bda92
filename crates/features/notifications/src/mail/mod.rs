mod compose;
mod http;
mod log;

pub use compose::{
    admin_alert, contact_alert, format_price, product_request_alert, quote_alert_sms, quote_confirmation,
    quote_sent,
};
pub use http::HttpMailer;
pub use log::LogMailer;

use crate::error::NotificationError;
use async_trait::async_trait;
use serde::Serialize;

/// A rendered message with plain-text and HTML bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Hands a rendered message to a mail service.
#[async_trait]
pub trait Mailer: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    /// [`NotificationError::Provider`] when the service rejects or cannot be reached.
    async fn send(&self, email: &Email) -> Result<(), NotificationError>;
}
