use super::{MAX_BODY_CHARS, MAX_TITLE_CHARS};
use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, ValidationError};
use chrono::{DateTime, Utc};

/// Keyed block of site copy (about page, shipping terms, footer text, ...).
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Slug; also the record key.
    pub key: String,
    pub title: String,
    pub body: String,
    pub is_active: bool,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /api/admin/content/{key}`.
#[api_model]
pub struct ContentBlockInput {
    pub title: String,
    pub body: String,
    #[serde(default = "active")]
    pub is_active: bool,
}

const fn active() -> bool {
    true
}

impl ContentBlockInput {
    /// # Errors
    /// Empty or oversized title/body.
    pub fn into_block(
        self,
        key: String,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<ContentBlock, ValidationError> {
        Ok(ContentBlock {
            key,
            title: validation::required("title", &self.title, MAX_TITLE_CHARS)?,
            body: validation::required("body", &self.body, MAX_BODY_CHARS)?,
            is_active: self.is_active,
            created_at,
            updated_at: now,
        })
    }
}
