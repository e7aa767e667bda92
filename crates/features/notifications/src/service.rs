use crate::NotificationsInner;
use crate::error::NotificationError;
use crate::model::{BulkSmsReport, SmsLog, SmsStatus};
use crate::phone;
use atelier_kernel::time;
use tracing::{info, warn};

/// Longest raw recipient kept in a log when the number could not be normalised.
const MAX_RAW_RECIPIENT_CHARS: usize = 64;

impl NotificationsInner {
    /// Sends one message and records the attempt.
    ///
    /// # Errors
    /// * [`NotificationError::Validation`] for an empty or oversized body, or an invalid
    ///   number (logged as `invalid`).
    /// * [`NotificationError::RateLimited`] when the recipient's window is full.
    /// * [`NotificationError::Provider`] when the provider fails (logged as `failed`).
    pub async fn send(&self, to: &str, body: &str) -> Result<SmsLog, NotificationError> {
        let body = self.check_body(body)?;
        let log = self.attempt(to, &body).await?;

        match log.status {
            SmsStatus::Sent => Ok(log),
            SmsStatus::Invalid => Err(NotificationError::validation(reason(&log))),
            SmsStatus::RateLimited => {
                Err(NotificationError::RateLimited { message: reason(&log).into(), context: None })
            },
            SmsStatus::Failed => Err(NotificationError::Provider {
                message: reason(&log).into(),
                context: Some(self.sms.name().into()),
            }),
        }
    }

    /// Sends the same message to every recipient in order. One recipient failing never
    /// stops the others.
    ///
    /// # Errors
    /// [`NotificationError::Validation`] for a bad body or recipient count; storage failures.
    pub async fn send_bulk(&self, recipients: &[String], body: &str) -> Result<BulkSmsReport, NotificationError> {
        let body = self.check_body(body)?;
        let max = self.settings.max_bulk_recipients;
        if recipients.is_empty() || recipients.len() > max {
            return Err(NotificationError::validation(format!(
                "recipients must contain between 1 and {max} numbers"
            )));
        }

        let mut results = Vec::with_capacity(recipients.len());
        for to in recipients {
            results.push(self.attempt(to, &body).await?);
        }
        let report = BulkSmsReport::new(results);
        info!(total = report.total, sent = report.sent, failed = report.failed, "Bulk SMS finished");
        Ok(report)
    }

    /// Runs one attempt through validation, rate limiting and the provider, and stores the
    /// outcome. Only storage failures are returned as errors.
    pub(crate) async fn attempt(&self, to: &str, body: &str) -> Result<SmsLog, NotificationError> {
        let mut log = SmsLog {
            id: String::new(),
            to: to.trim().chars().take(MAX_RAW_RECIPIENT_CHARS).collect(),
            body: body.to_owned(),
            status: SmsStatus::Invalid,
            provider_message_id: None,
            error: None,
            created_at: time::now(),
        };

        match phone::normalize(to) {
            Err(err) => log.error = Some(err.to_string()),
            Ok(number) if !self.limiter.try_acquire(&number) => {
                log.to = number;
                log.status = SmsStatus::RateLimited;
                log.error = Some("Too many messages to this number, try again later".to_owned());
            },
            Ok(number) => {
                log.to = number;
                match self.sms.send(&log.to, body).await {
                    Ok(receipt) => {
                        log.status = SmsStatus::Sent;
                        log.provider_message_id = receipt.message_id;
                    },
                    Err(err) => {
                        log.status = SmsStatus::Failed;
                        log.error = Some(err.detail());
                    },
                }
            },
        }

        let stored = self.logs.record(&log).await?;
        if stored.status == SmsStatus::Sent {
            info!(id = %stored.id, to = %stored.to, provider = self.sms.name(), "SMS sent");
        } else {
            warn!(id = %stored.id, to = %stored.to, status = %stored.status, error = ?stored.error, "SMS not sent");
        }
        Ok(stored)
    }

    fn check_body(&self, body: &str) -> Result<String, NotificationError> {
        let body = body.trim();
        let max = self.settings.max_body_chars;
        if body.is_empty() {
            return Err(NotificationError::validation("body must not be empty"));
        }
        if body.chars().count() > max {
            return Err(NotificationError::validation(format!("body must be at most {max} characters")));
        }
        Ok(body.to_owned())
    }
}

fn reason(log: &SmsLog) -> String {
    log.error.clone().unwrap_or_else(|| log.status.to_string())
}
