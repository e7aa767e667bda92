use super::visibility;
use crate::error::{ContentError, ContentErrorExt};
use crate::model::ContentBlock;
use atelier_database::{Collection, Database, Direction};
use atelier_kernel::domain::constants::CONTENT;

#[derive(Debug, Clone)]
pub struct BlockRepository {
    collection: Collection,
}

impl BlockRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(CONTENT) }
    }

    /// # Errors
    /// Storage failures.
    pub async fn list(&self, active_only: bool) -> Result<Vec<ContentBlock>, ContentError> {
        self.collection
            .find(&visibility(active_only).order_by("key", Direction::Asc))
            .await
            .context("Listing content blocks")
    }

    /// # Errors
    /// [`ContentError::NotFound`] when missing, or inactive while `active_only`.
    pub async fn get(&self, key: &str, active_only: bool) -> Result<ContentBlock, ContentError> {
        self.collection
            .get::<ContentBlock>(key)
            .await
            .context("Fetching content block")?
            .filter(|block| block.is_active || !active_only)
            .ok_or_else(|| ContentError::not_found("Content", key))
    }

    /// Creates or replaces the block stored under `block.key`, keeping the original `createdAt`.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn upsert(&self, mut block: ContentBlock) -> Result<ContentBlock, ContentError> {
        if let Some(existing) =
            self.collection.get::<ContentBlock>(&block.key).await.context("Fetching content block")?
        {
            block.created_at = existing.created_at;
        }
        self.collection.save(&block.key, &block).await.context("Saving content block")
    }

    /// # Errors
    /// [`ContentError::NotFound`] for unknown keys.
    pub async fn delete(&self, key: &str) -> Result<(), ContentError> {
        if self.collection.delete(key).await.context("Deleting content block")? {
            Ok(())
        } else {
            Err(ContentError::not_found("Content", key))
        }
    }
}
