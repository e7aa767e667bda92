use super::{Email, Mailer};
use crate::error::NotificationError;
use async_trait::async_trait;
use atelier_kernel::domain::config::MailConfig;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "mail-api";

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// JSON mail API (`POST {api_url}/emails` with a bearer key).
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl std::fmt::Debug for HttpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailer")
            .field("endpoint", &self.endpoint)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl HttpMailer {
    /// # Errors
    /// [`NotificationError::Config`] when the key or sender is missing.
    pub fn from_config(config: &MailConfig) -> Result<Self, NotificationError> {
        if config.api_key.trim().is_empty() || config.from.trim().is_empty() {
            return Err(NotificationError::config("notifications.mail needs api_key and from"));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|err| NotificationError::config(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn send(&self, email: &Email) -> Result<(), NotificationError> {
        let payload = Payload {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| NotificationError::provider(err.to_string(), PROVIDER))?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %email.to, subject = %email.subject, "Mail accepted by provider");
            return Ok(());
        }
        let detail = response.text().await.unwrap_or_default();
        Err(NotificationError::provider(format!("{status}: {}", detail.trim()), PROVIDER))
    }
}
