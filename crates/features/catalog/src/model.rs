use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, MAX_NAME_CHARS, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_SKU_CHARS: usize = 64;
pub const MAX_PRICE_CENTS: u64 = 10_000_000_000;

/// Resale grading of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Excellent,
    VeryGood,
    Good,
    Fair,
}

#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub price_cents: u64,
    /// ISO 4217 code.
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub condition: Condition,
    pub is_available: bool,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Body of the product create and replace routes.
#[api_model]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub price_cents: u64,
    /// Defaults to the storefront currency.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub condition: Condition,
    #[serde(default = "available")]
    pub is_available: bool,
}

const fn available() -> bool {
    true
}

impl ProductInput {
    /// # Errors
    /// Malformed SKU or currency, blank names, prices out of range.
    pub fn into_product(
        self,
        default_currency: &str,
        now: DateTime<Utc>,
    ) -> Result<Product, ValidationError> {
        if self.price_cents > MAX_PRICE_CENTS {
            return Err(ValidationError::invalid("priceCents", "is out of range"));
        }
        let currency = normalize_currency(self.currency.as_deref().unwrap_or(default_currency))?;

        Ok(Product {
            id: String::new(),
            sku: normalize_sku(&self.sku)?,
            name: validation::required("name", &self.name, MAX_NAME_CHARS)?,
            brand: validation::required("brand", &self.brand, MAX_NAME_CHARS)?,
            price_cents: self.price_cents,
            currency,
            image_url: validation::optional_link("imageUrl", self.image_url.as_deref())?,
            condition: self.condition,
            is_available: self.is_available,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Upper-cases and checks `[A-Z0-9-]{1,64}`.
fn normalize_sku(raw: &str) -> Result<String, ValidationError> {
    let sku = validation::required("sku", raw, MAX_SKU_CHARS)?.to_ascii_uppercase();
    if sku.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-') {
        Ok(sku)
    } else {
        Err(ValidationError::invalid("sku", "may contain only letters, digits and dashes"))
    }
}

fn normalize_currency(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(ValidationError::invalid("currency", "must be a three-letter ISO 4217 code"))
    }
}

/// Public catalog filters.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListProducts {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub brand: Option<String>,
    pub available: Option<bool>,
}

/// Ordered product ids of a curated list.
#[api_model(stored)]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// Epoch when the list was never saved.
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Body of the curation replace routes.
#[api_model]
pub struct ProductSelectionInput {
    pub product_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            sku: " hb-birkin-30 ".to_owned(),
            name: "Birkin 30".to_owned(),
            brand: "Hermès".to_owned(),
            price_cents: 2_450_000,
            currency: None,
            image_url: None,
            condition: Condition::Excellent,
            is_available: true,
        }
    }

    #[test]
    fn sku_and_currency_are_normalised() {
        let product = input().into_product("eur", atelier_kernel::time::now()).unwrap();
        assert_eq!(product.sku, "HB-BIRKIN-30");
        assert_eq!(product.currency, "EUR");
    }

    #[test]
    fn malformed_sku_and_currency_are_rejected() {
        let now = atelier_kernel::time::now();
        let err = ProductInput { sku: "HB/30".to_owned(), ..input() }.into_product("USD", now).unwrap_err();
        assert_eq!(err.to_string(), "sku may contain only letters, digits and dashes");

        let err = ProductInput { currency: Some("dollars".to_owned()), ..input() }
            .into_product("USD", now)
            .unwrap_err();
        assert_eq!(err.to_string(), "currency must be a three-letter ISO 4217 code");
    }

    #[test]
    fn condition_wire_names() {
        assert_eq!(serde_json::to_value(Condition::VeryGood).unwrap(), "very_good");
    }
}
