use atelier_derive::api_model;
use atelier_kernel::time::{self, millis};
use atelier_kernel::validation::{self, MAX_NAME_CHARS, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_PHONE_CHARS: usize = 32;
pub const MAX_SUBJECT_CHARS: usize = 200;
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Triage state of a submission.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    New,
    Read,
    Responded,
    Archived,
}

/// A message sent through the storefront contact form.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Public form payload.
#[api_model]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl NewContactSubmission {
    /// Trims and checks the form, producing a `new` submission.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn into_submission(self) -> Result<ContactSubmission, ValidationError> {
        let now = time::now();
        Ok(ContactSubmission {
            id: String::new(),
            name: validation::required("name", &self.name, MAX_NAME_CHARS)?,
            email: validation::email("email", &self.email)?,
            phone: validation::optional("phone", self.phone.as_deref(), MAX_PHONE_CHARS)?,
            subject: validation::optional("subject", self.subject.as_deref(), MAX_SUBJECT_CHARS)?,
            message: validation::required("message", &self.message, MAX_MESSAGE_CHARS)?,
            status: SubmissionStatus::New,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Back-office status change.
#[api_model]
pub struct UpdateSubmissionStatus {
    pub status: SubmissionStatus,
}

/// Filters for the back-office listing.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListSubmissions {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<SubmissionStatus>,
}
