use crate::error::{NavigationError, NavigationErrorExt};
use crate::model::{Menu, Navbar};
use atelier_database::{Collection, Database, Direction, Query};
use atelier_kernel::domain::constants::{MENU, NAVBAR, SINGLETON_KEY};

/// Storage for [`Menu`] documents keyed by name.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    collection: Collection,
}

impl MenuRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(MENU) }
    }

    /// # Errors
    /// Storage failures.
    pub async fn list(&self) -> Result<Vec<Menu>, NavigationError> {
        let menus: Vec<Menu> = self
            .collection
            .find(&Query::new().order_by("name", Direction::Asc))
            .await
            .context("Listing menus")?;
        Ok(menus.into_iter().map(Menu::sorted).collect())
    }

    /// # Errors
    /// [`NavigationError::NotFound`] for unknown names.
    pub async fn get(&self, name: &str) -> Result<Menu, NavigationError> {
        self.collection
            .get::<Menu>(name)
            .await
            .context("Fetching menu")?
            .map(Menu::sorted)
            .ok_or_else(|| NavigationError::menu_not_found(name))
    }

    /// Creates or replaces `menu.name`, keeping the original `createdAt`.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn upsert(&self, mut menu: Menu) -> Result<Menu, NavigationError> {
        if let Some(existing) = self.collection.get::<Menu>(&menu.name).await.context("Fetching menu")? {
            menu.created_at = existing.created_at;
        }
        let stored: Menu = self.collection.save(&menu.name, &menu).await.context("Saving menu")?;
        Ok(stored.sorted())
    }

    /// # Errors
    /// [`NavigationError::NotFound`] for unknown names.
    pub async fn delete(&self, name: &str) -> Result<(), NavigationError> {
        if self.collection.delete(name).await.context("Deleting menu")? {
            Ok(())
        } else {
            Err(NavigationError::menu_not_found(name))
        }
    }
}

/// Storage for the [`Navbar`] singleton.
#[derive(Debug, Clone)]
pub struct NavbarRepository {
    collection: Collection,
}

impl NavbarRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(NAVBAR) }
    }

    /// The saved navbar, or an empty one.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn get(&self) -> Result<Navbar, NavigationError> {
        let stored: Option<Navbar> =
            self.collection.get(SINGLETON_KEY).await.context("Fetching navbar")?;
        Ok(stored.unwrap_or_default().sorted())
    }

    /// # Errors
    /// Storage failures.
    pub async fn save(&self, navbar: &Navbar) -> Result<Navbar, NavigationError> {
        let stored: Navbar = self.collection.save(SINGLETON_KEY, navbar).await.context("Saving navbar")?;
        Ok(stored.sorted())
    }
}
