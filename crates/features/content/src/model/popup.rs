use super::{MAX_TEXT_CHARS, MAX_TITLE_CHARS};
use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, ValidationError};
use chrono::{DateTime, Utc};

pub const MAX_DELAY_SECONDS: u32 = 600;
const MAX_CODE_CHARS: usize = 40;

/// Newsletter signup popup configuration (singleton).
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct SignupPopup {
    pub enabled: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub delay_seconds: u32,
    /// Epoch when the popup was never configured.
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

impl Default for SignupPopup {
    fn default() -> Self {
        Self {
            enabled: false,
            title: "Join the Atelier list".to_owned(),
            description: None,
            image_url: None,
            button_text: "Subscribe".to_owned(),
            discount_code: None,
            delay_seconds: 5,
            updated_at: DateTime::default(),
        }
    }
}

#[api_model]
pub struct SignupPopupInput {
    pub enabled: bool,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub button_text: String,
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub delay_seconds: u32,
}

impl SignupPopupInput {
    /// # Errors
    /// Empty title or button, delays above ten minutes.
    pub fn into_popup(self, now: DateTime<Utc>) -> Result<SignupPopup, ValidationError> {
        if self.delay_seconds > MAX_DELAY_SECONDS {
            return Err(ValidationError::invalid(
                "delaySeconds",
                format!("must be at most {MAX_DELAY_SECONDS}"),
            ));
        }
        let discount_code =
            validation::optional("discountCode", self.discount_code.as_deref(), MAX_CODE_CHARS)?
                .map(|code| code.to_uppercase());

        Ok(SignupPopup {
            enabled: self.enabled,
            title: validation::required("title", &self.title, MAX_TITLE_CHARS)?,
            description: validation::optional(
                "description",
                self.description.as_deref(),
                MAX_TEXT_CHARS,
            )?,
            image_url: validation::optional_link("imageUrl", self.image_url.as_deref())?,
            button_text: validation::required("buttonText", &self.button_text, MAX_TITLE_CHARS)?,
            discount_code,
            delay_seconds: self.delay_seconds,
            updated_at: now,
        })
    }
}
