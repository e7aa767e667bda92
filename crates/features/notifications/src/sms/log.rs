use super::{SmsProvider, SmsReceipt};
use crate::error::NotificationError;
use async_trait::async_trait;
use tracing::info;

/// Writes messages to the log instead of sending them.
#[derive(Debug, Default)]
pub struct LogSmsProvider;

#[async_trait]
impl SmsProvider for LogSmsProvider {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, NotificationError> {
        info!(%to, chars = body.chars().count(), "SMS delivery disabled, message logged only");
        Ok(SmsReceipt { message_id: None })
    }
}
