use super::visibility;
use crate::error::{ContentError, ContentErrorExt};
use crate::model::HeroSection;
use atelier_database::{Collection, Database, Direction};
use atelier_kernel::domain::constants::HERO_SECTION;
use atelier_kernel::safe_nanoid;

#[derive(Debug, Clone)]
pub struct HeroRepository {
    collection: Collection,
}

impl HeroRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(HERO_SECTION) }
    }

    /// Sections ordered by `position`, oldest first on ties.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn list(&self, active_only: bool) -> Result<Vec<HeroSection>, ContentError> {
        self.collection
            .find(
                &visibility(active_only)
                    .order_by("position", Direction::Asc)
                    .order_by("createdAt", Direction::Asc),
            )
            .await
            .context("Listing hero sections")
    }

    /// # Errors
    /// Storage failures.
    pub async fn create(&self, section: &HeroSection) -> Result<HeroSection, ContentError> {
        self.collection.insert(&safe_nanoid!(), section).await.context("Saving hero section")
    }

    /// # Errors
    /// [`ContentError::NotFound`] for unknown ids.
    pub async fn replace(&self, id: &str, mut section: HeroSection) -> Result<HeroSection, ContentError> {
        let existing = self
            .collection
            .get::<HeroSection>(id)
            .await
            .context("Fetching hero section")?
            .ok_or_else(|| ContentError::not_found("Hero section", id))?;
        section.created_at = existing.created_at;

        self.collection
            .replace(id, &section)
            .await
            .context("Replacing hero section")?
            .ok_or_else(|| ContentError::not_found("Hero section", id))
    }

    /// # Errors
    /// [`ContentError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if self.collection.delete(id).await.context("Deleting hero section")? {
            Ok(())
        } else {
            Err(ContentError::not_found("Hero section", id))
        }
    }
}
