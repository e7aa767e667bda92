use crate::error::{ContentError, ContentErrorExt};
use crate::model::SignupPopup;
use atelier_database::{Collection, Database};
use atelier_kernel::domain::constants::{SIGNUP_POPUP, SINGLETON_KEY};

#[derive(Debug, Clone)]
pub struct PopupRepository {
    collection: Collection,
}

impl PopupRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(SIGNUP_POPUP) }
    }

    /// The stored configuration, or the disabled default.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn get(&self) -> Result<SignupPopup, ContentError> {
        Ok(self
            .collection
            .get(SINGLETON_KEY)
            .await
            .context("Fetching signup popup")?
            .unwrap_or_default())
    }

    /// # Errors
    /// Storage failures.
    pub async fn save(&self, popup: &SignupPopup) -> Result<SignupPopup, ContentError> {
        self.collection.save(SINGLETON_KEY, popup).await.context("Saving signup popup")
    }
}
