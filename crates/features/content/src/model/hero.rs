use super::{MAX_TEXT_CHARS, MAX_TITLE_CHARS};
use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, ValidationError};
use chrono::{DateTime, Utc};

/// Banner shown at the top of the storefront.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct HeroSection {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
    pub position: i32,
    pub is_active: bool,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

#[api_model]
pub struct HeroSectionInput {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub mobile_image_url: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active")]
    pub is_active: bool,
}

const fn active() -> bool {
    true
}

impl HeroSectionInput {
    /// # Errors
    /// Missing title or image, malformed links, oversized text.
    pub fn into_section(
        self,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<HeroSection, ValidationError> {
        let cta_text = validation::optional("ctaText", self.cta_text.as_deref(), MAX_TITLE_CHARS)?;
        let cta_link = validation::optional_link("ctaLink", self.cta_link.as_deref())?;
        if cta_text.is_some() != cta_link.is_some() {
            return Err(ValidationError::invalid("ctaLink", "must be set together with ctaText"));
        }

        Ok(HeroSection {
            id: String::new(),
            title: validation::required("title", &self.title, MAX_TITLE_CHARS)?,
            subtitle: validation::optional("subtitle", self.subtitle.as_deref(), MAX_TEXT_CHARS)?,
            image_url: validation::link("imageUrl", &self.image_url)?,
            mobile_image_url: validation::optional_link(
                "mobileImageUrl",
                self.mobile_image_url.as_deref(),
            )?,
            cta_text,
            cta_link,
            position: self.position,
            is_active: self.is_active,
            created_at,
            updated_at: now,
        })
    }
}
