use atelier_derive::api_model;
use atelier_kernel::time::millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one SMS attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SmsStatus {
    Sent,
    Failed,
    RateLimited,
    Invalid,
}

/// Audit record written for every SMS attempt.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct SmsLog {
    #[serde(default)]
    pub id: String,
    /// Normalised number, or the input as given when it could not be normalised.
    pub to: String,
    pub body: String,
    pub status: SmsStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
}

/// Body of the single-send route.
#[api_model]
pub struct SendSms {
    pub to: String,
    pub body: String,
}

/// Body of the bulk route.
#[api_model]
pub struct BulkSms {
    pub recipients: Vec<String>,
    pub body: String,
}

/// Per-recipient outcomes of a bulk send, in request order.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct BulkSmsReport {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub results: Vec<SmsLog>,
}

impl BulkSmsReport {
    #[must_use]
    pub fn new(results: Vec<SmsLog>) -> Self {
        let sent = results.iter().filter(|log| log.status == SmsStatus::Sent).count();
        Self { total: results.len(), sent, failed: results.len() - sent, results }
    }
}

/// Filters for the log listing.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListSmsLogs {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<SmsStatus>,
    /// Exact recipient; normalised before matching when it is a valid number.
    pub to: Option<String>,
}
