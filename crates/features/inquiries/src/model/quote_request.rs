use super::{MAX_DESCRIPTION_CHARS, MAX_PHONE_CHARS, amount, patch_notes};
use crate::error::InquiryError;
use atelier_derive::api_model;
use atelier_kernel::domain::constants::PRODUCT;
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, MAX_NAME_CHARS, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a quote request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Reviewing,
    Quoted,
    Accepted,
    Declined,
    Closed,
}

/// A customer asking for the price of an item.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    #[serde(default)]
    pub id: String,
    /// `QR-YYMMDD-XXXXXX`, unique.
    pub reference_number: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_price_cents: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Public quote form.
#[api_model]
pub struct NewQuoteRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Catalog product the quote is about, when there is one.
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewQuoteRequest {
    /// Builds a pending request; the reference number is assigned on insert.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn into_request(self, now: DateTime<Utc>) -> Result<QuoteRequest, ValidationError> {
        let product_id = match validation::optional("productId", self.product_id.as_deref(), 128)? {
            Some(raw) => Some(
                ResourceGuard::verify(raw, PRODUCT)
                    .map_err(|_| ValidationError::invalid("productId", "is not a product id"))?,
            ),
            None => None,
        };

        Ok(QuoteRequest {
            id: String::new(),
            reference_number: String::new(),
            name: validation::required("name", &self.name, MAX_NAME_CHARS)?,
            email: validation::email("email", &self.email)?,
            phone: validation::optional("phone", self.phone.as_deref(), MAX_PHONE_CHARS)?,
            product_id,
            product_name: validation::required("productName", &self.product_name, MAX_NAME_CHARS)?,
            message: validation::optional("message", self.message.as_deref(), MAX_DESCRIPTION_CHARS)?,
            status: QuoteStatus::Pending,
            quoted_price_cents: None,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Back-office patch; absent fields stay unchanged.
#[api_model]
#[derive(Default)]
pub struct UpdateQuoteRequest {
    #[serde(default)]
    pub status: Option<QuoteStatus>,
    #[serde(default)]
    pub quoted_price_cents: Option<u64>,
    /// A blank value clears the notes.
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl UpdateQuoteRequest {
    /// Applies the patch. A request can only be `quoted` once it carries a price.
    ///
    /// # Errors
    /// [`InquiryError::InvalidUpdate`] for out-of-range prices, oversized notes and quoting
    /// without a price.
    pub fn apply(self, mut quote: QuoteRequest, now: DateTime<Utc>) -> Result<QuoteRequest, InquiryError> {
        let invalid = |err: ValidationError| InquiryError::invalid_update(err.to_string());

        if let Some(price) = amount("quotedPriceCents", self.quoted_price_cents).map_err(invalid)? {
            quote.quoted_price_cents = Some(price);
        }
        if let Some(status) = self.status {
            if status == QuoteStatus::Quoted && quote.quoted_price_cents.is_none() {
                return Err(InquiryError::invalid_update("quotedPriceCents is required to quote a request"));
            }
            quote.status = status;
        }
        quote.admin_notes = patch_notes(quote.admin_notes, self.admin_notes.as_deref()).map_err(invalid)?;
        quote.updated_at = now;
        Ok(quote)
    }
}

/// Filters for the back-office listing.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListQuoteRequests {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<QuoteStatus>,
}

/// Public tracking lookup.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct TrackQuote {
    pub reference: String,
    pub email: String,
}

/// What a customer may see about their own quote.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct QuoteTracking {
    pub reference_number: String,
    pub product_name: String,
    pub status: QuoteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_price_cents: Option<u64>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

impl From<QuoteRequest> for QuoteTracking {
    fn from(quote: QuoteRequest) -> Self {
        Self {
            reference_number: quote.reference_number,
            product_name: quote.product_name,
            status: quote.status,
            quoted_price_cents: quote.quoted_price_cents,
            updated_at: quote.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_kernel::time;

    fn form() -> NewQuoteRequest {
        NewQuoteRequest {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: Some("+44 20 7946 0958".to_owned()),
            product_id: Some("product:abc123".to_owned()),
            product_name: "Birkin 30 Gold".to_owned(),
            message: None,
        }
    }

    #[test]
    fn product_id_is_reduced_to_a_key() {
        let quote = form().into_request(time::now()).unwrap();
        assert_eq!(quote.product_id.as_deref(), Some("abc123"));
        assert_eq!(quote.status, QuoteStatus::Pending);

        let err = NewQuoteRequest { product_id: Some("menu:abc".to_owned()), ..form() }
            .into_request(time::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "productId is not a product id");
    }

    #[test]
    fn quoting_requires_a_price() {
        let now = time::now();
        let quote = form().into_request(now).unwrap();

        let err = UpdateQuoteRequest { status: Some(QuoteStatus::Quoted), ..Default::default() }
            .apply(quote.clone(), now)
            .unwrap_err();
        assert!(matches!(err, InquiryError::InvalidUpdate { .. }));

        let quoted = UpdateQuoteRequest {
            status: Some(QuoteStatus::Quoted),
            quoted_price_cents: Some(2_100_000),
            admin_notes: None,
        }
        .apply(quote, now)
        .unwrap();
        assert_eq!(quoted.status, QuoteStatus::Quoted);
        assert_eq!(quoted.quoted_price_cents, Some(2_100_000));
    }

    #[test]
    fn stored_price_allows_quoting_later() {
        let now = time::now();
        let priced = UpdateQuoteRequest { quoted_price_cents: Some(500), ..Default::default() }
            .apply(form().into_request(now).unwrap(), now)
            .unwrap();
        assert_eq!(priced.status, QuoteStatus::Pending);

        let quoted = UpdateQuoteRequest { status: Some(QuoteStatus::Quoted), ..Default::default() }
            .apply(priced, now)
            .unwrap();
        assert_eq!(quoted.quoted_price_cents, Some(500));
    }

    #[test]
    fn tracking_view_hides_contact_details() {
        let view = QuoteTracking::from(form().into_request(time::now()).unwrap());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["status"], "pending");
    }
}
