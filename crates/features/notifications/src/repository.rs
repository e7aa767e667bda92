use crate::error::{NotificationError, NotificationErrorExt};
use crate::model::{SmsLog, SmsStatus};
use atelier_database::{Collection, Database, Direction, Query};
use atelier_kernel::domain::constants::SMS_LOG;
use atelier_kernel::safe_nanoid;
use atelier_kernel::server::{Page, Pagination};

/// Append-only storage for [`SmsLog`] records.
#[derive(Debug, Clone)]
pub struct SmsLogRepository {
    collection: Collection,
}

impl SmsLogRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(SMS_LOG) }
    }

    /// # Errors
    /// Storage failures.
    pub async fn record(&self, log: &SmsLog) -> Result<SmsLog, NotificationError> {
        self.collection.insert(&safe_nanoid!(), log).await.context("Recording SMS attempt")
    }

    /// Newest first.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn list(
        &self,
        status: Option<SmsStatus>,
        to: Option<String>,
        pagination: Pagination,
    ) -> Result<Page<SmsLog>, NotificationError> {
        let filter = Query::new()
            .filter_opt("status", status.map(|s| s.as_ref().to_owned()))
            .filter_opt("to", to);
        let total = self.collection.count(&filter).await.context("Counting SMS logs")?;
        let items = self
            .collection
            .find(
                &filter
                    .order_by("createdAt", Direction::Desc)
                    .limit(pagination.limit())
                    .start(pagination.offset()),
            )
            .await
            .context("Listing SMS logs")?;
        Ok(pagination.wrap(items, total))
    }
}
