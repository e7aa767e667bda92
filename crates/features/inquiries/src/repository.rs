use crate::error::{InquiryError, InquiryErrorExt};
use crate::model::{ProductRequest, ProductRequestStatus, QuoteRequest, QuoteStatus};
use atelier_database::{Collection, Database, Direction, Query};
use atelier_kernel::domain::constants::{PRODUCT_REQUEST, QUOTE_REQUEST};
use atelier_kernel::server::{Page, Pagination};
use atelier_kernel::{ids, safe_nanoid};
use tracing::debug;

/// Fresh references tried before giving up on a quote insert.
const REFERENCE_ATTEMPTS: usize = 5;

/// Newest-first page over `collection`, optionally narrowed to one status.
async fn page<T: serde::de::DeserializeOwned>(
    collection: &Collection,
    status: Option<String>,
    pagination: Pagination,
) -> Result<Page<T>, InquiryError> {
    let filter = Query::new().filter_opt("status", status);
    let total = collection.count(&filter).await.context("Counting requests")?;
    let items = collection
        .find(
            &filter
                .order_by("createdAt", Direction::Desc)
                .limit(pagination.limit())
                .start(pagination.offset()),
        )
        .await
        .context("Listing requests")?;
    Ok(pagination.wrap(items, total))
}

/// Storage for [`ProductRequest`] documents.
#[derive(Debug, Clone)]
pub struct ProductRequestRepository {
    collection: Collection,
}

impl ProductRequestRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(PRODUCT_REQUEST) }
    }

    /// # Errors
    /// Storage failures.
    pub async fn create(&self, request: &ProductRequest) -> Result<ProductRequest, InquiryError> {
        self.collection.insert(&safe_nanoid!(), request).await.context("Saving product request")
    }

    /// # Errors
    /// Storage failures.
    pub async fn list(
        &self,
        status: Option<ProductRequestStatus>,
        pagination: Pagination,
    ) -> Result<Page<ProductRequest>, InquiryError> {
        page(&self.collection, status.map(|s| s.as_ref().to_owned()), pagination).await
    }

    /// # Errors
    /// [`InquiryError::NotFound`] for unknown keys.
    pub async fn get(&self, id: &str) -> Result<ProductRequest, InquiryError> {
        self.collection
            .get(id)
            .await
            .context("Fetching product request")?
            .ok_or_else(|| InquiryError::product_request_not_found(id))
    }

    /// # Errors
    /// [`InquiryError::NotFound`] for unknown keys.
    pub async fn replace(&self, request: &ProductRequest) -> Result<ProductRequest, InquiryError> {
        self.collection
            .replace(&request.id, request)
            .await
            .context("Updating product request")?
            .ok_or_else(|| InquiryError::product_request_not_found(&request.id))
    }

    /// # Errors
    /// [`InquiryError::NotFound`] for unknown keys.
    pub async fn delete(&self, id: &str) -> Result<(), InquiryError> {
        if self.collection.delete(id).await.context("Deleting product request")? {
            Ok(())
        } else {
            Err(InquiryError::product_request_not_found(id))
        }
    }
}

/// Storage for [`QuoteRequest`] documents.
#[derive(Debug, Clone)]
pub struct QuoteRequestRepository {
    collection: Collection,
}

impl QuoteRequestRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(QUOTE_REQUEST) }
    }

    /// Stores a quote under a freshly drawn reference number, drawing again when the
    /// unique index reports a collision.
    ///
    /// # Errors
    /// Storage failures, or [`InquiryError::Internal`] when every attempt collided.
    pub async fn create(&self, mut quote: QuoteRequest) -> Result<QuoteRequest, InquiryError> {
        for attempt in 1..=REFERENCE_ATTEMPTS {
            quote.reference_number = ids::quote_reference(quote.created_at);
            match self.collection.insert(&safe_nanoid!(), &quote).await {
                Ok(stored) => return Ok(stored),
                Err(err) if err.is_conflict() => {
                    debug!(attempt, reference = %quote.reference_number, "Quote reference collision");
                },
                Err(err) => return Err(err).context("Saving quote request"),
            }
        }

        Err(InquiryError::Internal {
            message: "Could not allocate a unique reference number".into(),
            context: Some(format!("{REFERENCE_ATTEMPTS} attempts").into()),
        })
    }

    /// # Errors
    /// Storage failures.
    pub async fn list(
        &self,
        status: Option<QuoteStatus>,
        pagination: Pagination,
    ) -> Result<Page<QuoteRequest>, InquiryError> {
        page(&self.collection, status.map(|s| s.as_ref().to_owned()), pagination).await
    }

    /// # Errors
    /// [`InquiryError::NotFound`] for unknown keys.
    pub async fn get(&self, id: &str) -> Result<QuoteRequest, InquiryError> {
        self.collection
            .get(id)
            .await
            .context("Fetching quote request")?
            .ok_or_else(|| InquiryError::quote_not_found(id))
    }

    /// Looks a quote up by reference number and the email it was filed with.
    ///
    /// The reference is matched case-insensitively after trimming, as is the email.
    ///
    /// # Errors
    /// [`InquiryError::NotFound`] unless both match.
    pub async fn track(&self, reference: &str, email: &str) -> Result<QuoteRequest, InquiryError> {
        let reference = reference.trim().to_ascii_uppercase();
        if !ids::is_quote_reference(&reference) {
            return Err(InquiryError::quote_not_tracked());
        }

        let quote: Option<QuoteRequest> = self
            .collection
            .find_one(Query::new().filter("referenceNumber", reference))
            .await
            .context("Tracking quote request")?;
        quote
            .filter(|quote| quote.email.eq_ignore_ascii_case(email.trim()))
            .ok_or_else(InquiryError::quote_not_tracked)
    }

    /// # Errors
    /// [`InquiryError::NotFound`] for unknown keys.
    pub async fn replace(&self, quote: &QuoteRequest) -> Result<QuoteRequest, InquiryError> {
        self.collection
            .replace(&quote.id, quote)
            .await
            .context("Updating quote request")?
            .ok_or_else(|| InquiryError::quote_not_found(&quote.id))
    }

    /// # Errors
    /// [`InquiryError::NotFound`] for unknown keys.
    pub async fn delete(&self, id: &str) -> Result<(), InquiryError> {
        if self.collection.delete(id).await.context("Deleting quote request")? {
            Ok(())
        } else {
            Err(InquiryError::quote_not_found(id))
        }
    }
}
