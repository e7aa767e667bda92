use super::{Email, Mailer};
use crate::error::NotificationError;
use async_trait::async_trait;
use tracing::info;

/// Writes messages to the log instead of sending them.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        info!(to = %email.to, subject = %email.subject, "Mail delivery disabled, message logged only");
        Ok(())
    }
}
