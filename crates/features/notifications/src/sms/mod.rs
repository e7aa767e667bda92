mod log;
mod twilio;

pub use log::LogSmsProvider;
pub use twilio::TwilioProvider;

use crate::error::NotificationError;
use async_trait::async_trait;

/// Accepted message as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsReceipt {
    pub message_id: Option<String>,
}

/// Delivers one text message to an already normalised number.
#[async_trait]
pub trait SmsProvider: std::fmt::Debug + Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// # Errors
    /// [`NotificationError::Provider`] when the provider rejects or cannot be reached.
    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, NotificationError>;
}
