use super::{SmsProvider, SmsReceipt};
use crate::error::NotificationError;
use async_trait::async_trait;
use atelier_kernel::domain::config::SmsConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "twilio";

#[derive(Deserialize)]
struct MessageResource {
    sid: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResource {
    message: Option<String>,
    code: Option<u32>,
}

/// Twilio-compatible Messages API: form POST with basic auth.
#[derive(Clone)]
pub struct TwilioProvider {
    client: reqwest::Client,
    endpoint: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl std::fmt::Debug for TwilioProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioProvider")
            .field("endpoint", &self.endpoint)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl TwilioProvider {
    /// # Errors
    /// [`NotificationError::Config`] when credentials or the sender number are missing.
    pub fn from_config(config: &SmsConfig) -> Result<Self, NotificationError> {
        if config.account_sid.trim().is_empty() || config.auth_token.trim().is_empty() {
            return Err(NotificationError::config("notifications.sms needs account_sid and auth_token"));
        }
        let from = crate::phone::normalize(&config.from_number)
            .map_err(|_| NotificationError::config("notifications.sms.from_number is not a valid phone number"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|err| NotificationError::config(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                config.api_url.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from,
        })
    }
}

#[async_trait]
impl SmsProvider for TwilioProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn send(&self, to: &str, body: &str) -> Result<SmsReceipt, NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(|err| NotificationError::provider(err.to_string(), PROVIDER))?;

        let status = response.status();
        if status.is_success() {
            let resource: MessageResource = response
                .json()
                .await
                .map_err(|err| NotificationError::provider(err.to_string(), PROVIDER))?;
            debug!(%to, sid = ?resource.sid, "SMS accepted by provider");
            return Ok(SmsReceipt { message_id: resource.sid });
        }

        let detail = match response.json::<ErrorResource>().await {
            Ok(ErrorResource { message: Some(message), code }) => match code {
                Some(code) => format!("{status}: {message} (code {code})"),
                None => format!("{status}: {message}"),
            },
            _ => status.to_string(),
        };
        Err(NotificationError::provider(detail, PROVIDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_and_sender_are_required() {
        let err = TwilioProvider::from_config(&SmsConfig::default()).unwrap_err();
        assert!(matches!(err, NotificationError::Config { .. }));

        let config = SmsConfig {
            account_sid: "AC1".to_owned(),
            auth_token: "secret".to_owned(),
            from_number: "12".to_owned(),
            ..SmsConfig::default()
        };
        assert!(TwilioProvider::from_config(&config).is_err());
    }

    #[test]
    fn endpoint_is_scoped_to_the_account() {
        let config = SmsConfig {
            api_url: "https://sms.example/".to_owned(),
            account_sid: "AC1".to_owned(),
            auth_token: "secret".to_owned(),
            from_number: "+15005550006".to_owned(),
            ..SmsConfig::default()
        };
        let provider = TwilioProvider::from_config(&config).unwrap();
        assert_eq!(provider.endpoint, "https://sms.example/2010-04-01/Accounts/AC1/Messages.json");
        assert!(!format!("{provider:?}").contains("secret"));
    }
}
