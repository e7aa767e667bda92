use crate::error::{ContactError, ContactErrorExt};
use crate::model::{ContactSubmission, SubmissionStatus};
use atelier_database::{Collection, Database, Direction, Query};
use atelier_kernel::domain::constants::CONTACT_SUBMISSION;
use atelier_kernel::safe_nanoid;
use atelier_kernel::server::{Page, Pagination};
use atelier_kernel::time;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPatch {
    status: SubmissionStatus,
    #[serde(with = "atelier_kernel::time::millis")]
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// Storage for [`ContactSubmission`] documents.
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    collection: Collection,
}

impl SubmissionRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(CONTACT_SUBMISSION) }
    }

    /// Stores a validated submission under a fresh key.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn create(&self, submission: &ContactSubmission) -> Result<ContactSubmission, ContactError> {
        self.collection.insert(&safe_nanoid!(), submission).await.context("Saving submission")
    }

    /// Newest first, optionally narrowed to one status.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn list(
        &self,
        status: Option<SubmissionStatus>,
        pagination: Pagination,
    ) -> Result<Page<ContactSubmission>, ContactError> {
        let filter = Query::new().filter_opt("status", status.map(|s| s.as_ref().to_owned()));
        let total = self.collection.count(&filter).await.context("Counting submissions")?;
        let items = self
            .collection
            .find(
                &filter
                    .order_by("createdAt", Direction::Desc)
                    .limit(pagination.limit())
                    .start(pagination.offset()),
            )
            .await
            .context("Listing submissions")?;
        Ok(pagination.wrap(items, total))
    }

    /// # Errors
    /// [`ContactError::NotFound`] for unknown keys.
    pub async fn get(&self, id: &str) -> Result<ContactSubmission, ContactError> {
        self.collection
            .get(id)
            .await
            .context("Fetching submission")?
            .ok_or_else(|| ContactError::not_found(id))
    }

    /// # Errors
    /// [`ContactError::NotFound`] for unknown keys.
    pub async fn set_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<ContactSubmission, ContactError> {
        let patch = StatusPatch { status, updated_at: time::now() };
        self.collection
            .merge(id, &patch)
            .await
            .context("Updating submission status")?
            .ok_or_else(|| ContactError::not_found(id))
    }

    /// # Errors
    /// [`ContactError::NotFound`] for unknown keys.
    pub async fn delete(&self, id: &str) -> Result<(), ContactError> {
        if self.collection.delete(id).await.context("Deleting submission")? {
            Ok(())
        } else {
            Err(ContactError::not_found(id))
        }
    }
}
