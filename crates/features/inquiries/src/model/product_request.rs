use super::{MAX_DESCRIPTION_CHARS, MAX_PHONE_CHARS, amount, patch_notes};
use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, MAX_NAME_CHARS, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sourcing progress of a product request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductRequestStatus {
    #[default]
    Pending,
    Sourcing,
    Found,
    Closed,
}

/// A customer asking the team to find an item that is not in the catalog.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct ProductRequest {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub brand: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_cents: Option<u64>,
    #[serde(default)]
    pub status: ProductRequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Public request form.
#[api_model]
pub struct NewProductRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub brand: String,
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget_cents: Option<u64>,
}

impl NewProductRequest {
    /// # Errors
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn into_request(self, now: DateTime<Utc>) -> Result<ProductRequest, ValidationError> {
        Ok(ProductRequest {
            id: String::new(),
            name: validation::required("name", &self.name, MAX_NAME_CHARS)?,
            email: validation::email("email", &self.email)?,
            phone: validation::optional("phone", self.phone.as_deref(), MAX_PHONE_CHARS)?,
            brand: validation::required("brand", &self.brand, MAX_NAME_CHARS)?,
            product_name: validation::required("productName", &self.product_name, MAX_NAME_CHARS)?,
            description: validation::optional(
                "description",
                self.description.as_deref(),
                MAX_DESCRIPTION_CHARS,
            )?,
            budget_cents: amount("budgetCents", self.budget_cents)?,
            status: ProductRequestStatus::Pending,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Back-office patch; absent fields stay unchanged.
#[api_model]
#[derive(Default)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub status: Option<ProductRequestStatus>,
    /// A blank value clears the notes.
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl UpdateProductRequest {
    /// # Errors
    /// Oversized notes.
    pub fn apply(self, mut request: ProductRequest, now: DateTime<Utc>) -> Result<ProductRequest, ValidationError> {
        if let Some(status) = self.status {
            request.status = status;
        }
        request.admin_notes = patch_notes(request.admin_notes, self.admin_notes.as_deref())?;
        request.updated_at = now;
        Ok(request)
    }
}

/// Filters for the back-office listing.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListProductRequests {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ProductRequestStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_kernel::time;

    fn form() -> NewProductRequest {
        NewProductRequest {
            name: "Grace".to_owned(),
            email: "grace@example.com".to_owned(),
            phone: None,
            brand: " Hermès ".to_owned(),
            product_name: "Kelly 25".to_owned(),
            description: Some(String::new()),
            budget_cents: Some(1_500_000),
        }
    }

    #[test]
    fn form_becomes_pending_request() {
        let request = form().into_request(time::now()).unwrap();
        assert_eq!(request.brand, "Hermès");
        assert_eq!(request.description, None);
        assert_eq!(request.status, ProductRequestStatus::Pending);
    }

    #[test]
    fn zero_budget_is_rejected() {
        let err = NewProductRequest { budget_cents: Some(0), ..form() }
            .into_request(time::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "budgetCents is out of range");
    }

    #[test]
    fn patch_keeps_absent_fields_and_clears_blank_notes() {
        let now = time::now();
        let request = form().into_request(now).unwrap();

        let noted = UpdateProductRequest { admin_notes: Some("Called supplier".to_owned()), ..Default::default() }
            .apply(request, now)
            .unwrap();
        assert_eq!(noted.admin_notes.as_deref(), Some("Called supplier"));

        let moved = UpdateProductRequest { status: Some(ProductRequestStatus::Sourcing), admin_notes: None }
            .apply(noted, now)
            .unwrap();
        assert_eq!(moved.status, ProductRequestStatus::Sourcing);
        assert_eq!(moved.admin_notes.as_deref(), Some("Called supplier"));

        let cleared = UpdateProductRequest { admin_notes: Some("  ".to_owned()), ..Default::default() }
            .apply(moved, now)
            .unwrap();
        assert_eq!(cleared.admin_notes, None);
    }
}
