use super::visibility;
use crate::error::{ContentError, ContentErrorExt};
use crate::model::HomepageContent;
use atelier_database::{Collection, Database, Direction};
use atelier_kernel::domain::constants::HOMEPAGE_CONTENT;

#[derive(Debug, Clone)]
pub struct HomepageRepository {
    collection: Collection,
}

impl HomepageRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(HOMEPAGE_CONTENT) }
    }

    /// Sections ordered by `position`, each with its elements in order.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn list(&self, active_only: bool) -> Result<Vec<HomepageContent>, ContentError> {
        let sections: Vec<HomepageContent> = self
            .collection
            .find(
                &visibility(active_only)
                    .order_by("position", Direction::Asc)
                    .order_by("section", Direction::Asc),
            )
            .await
            .context("Listing homepage sections")?;
        Ok(sections.into_iter().map(HomepageContent::sorted).collect())
    }

    /// # Errors
    /// [`ContentError::NotFound`] when missing, or inactive while `active_only`.
    pub async fn get(&self, section: &str, active_only: bool) -> Result<HomepageContent, ContentError> {
        self.collection
            .get::<HomepageContent>(section)
            .await
            .context("Fetching homepage section")?
            .filter(|found| found.is_active || !active_only)
            .map(HomepageContent::sorted)
            .ok_or_else(|| ContentError::not_found("Homepage section", section))
    }

    /// Creates or replaces `content.section`, keeping the original `createdAt`.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn upsert(&self, mut content: HomepageContent) -> Result<HomepageContent, ContentError> {
        if let Some(existing) = self
            .collection
            .get::<HomepageContent>(&content.section)
            .await
            .context("Fetching homepage section")?
        {
            content.created_at = existing.created_at;
        }
        let stored: HomepageContent = self
            .collection
            .save(&content.section, &content)
            .await
            .context("Saving homepage section")?;
        Ok(stored.sorted())
    }

    /// # Errors
    /// [`ContentError::NotFound`] for unknown sections.
    pub async fn delete(&self, section: &str) -> Result<(), ContentError> {
        if self.collection.delete(section).await.context("Deleting homepage section")? {
            Ok(())
        } else {
            Err(ContentError::not_found("Homepage section", section))
        }
    }
}
