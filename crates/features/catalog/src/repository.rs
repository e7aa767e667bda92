use crate::error::{CatalogError, CatalogErrorExt};
use crate::model::{Product, ProductSelection};
use atelier_database::{Collection, Database, Direction, Query};
use atelier_kernel::domain::constants::{
    POPUP_PRODUCT_SELECTION, PRODUCT, SALE_ITEMS_SELECTION, SINGLETON_KEY,
};
use atelier_kernel::safe_nanoid;
use atelier_kernel::server::{Page, Pagination};
use fxhash::{FxHashMap, FxHashSet};

/// Storage for [`Product`] documents.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    collection: Collection,
}

impl ProductRepository {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(PRODUCT) }
    }

    /// Newest first.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn list(
        &self,
        brand: Option<String>,
        available: Option<bool>,
        pagination: Pagination,
    ) -> Result<Page<Product>, CatalogError> {
        let filter = Query::new().filter_opt("brand", brand).filter_opt("isAvailable", available);
        let total = self.collection.count(&filter).await.context("Counting products")?;
        let items = self
            .collection
            .find(
                &filter
                    .order_by("createdAt", Direction::Desc)
                    .limit(pagination.limit())
                    .start(pagination.offset()),
            )
            .await
            .context("Listing products")?;
        Ok(pagination.wrap(items, total))
    }

    /// # Errors
    /// [`CatalogError::NotFound`] for unknown ids.
    pub async fn get(&self, id: &str) -> Result<Product, CatalogError> {
        self.collection
            .get(id)
            .await
            .context("Fetching product")?
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    /// Products for `ids` in the same order; unknown ids are skipped.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn get_ordered(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        let mut by_id: FxHashMap<String, Product> = self
            .collection
            .get_many::<Product>(ids)
            .await
            .context("Fetching products")?
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Ids from `ids` that name no stored product.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn missing(&self, ids: &[String]) -> Result<Vec<String>, CatalogError> {
        let found: FxHashSet<String> = self
            .collection
            .get_many::<Product>(ids)
            .await
            .context("Fetching products")?
            .into_iter()
            .map(|product| product.id)
            .collect();
        Ok(ids.iter().filter(|id| !found.contains(*id)).cloned().collect())
    }

    /// # Errors
    /// [`CatalogError::DuplicateSku`] when the SKU is taken.
    pub async fn create(&self, product: &Product) -> Result<Product, CatalogError> {
        self.collection
            .insert(&safe_nanoid!(), product)
            .await
            .map_err(|err| CatalogError::from_write(err, &product.sku))
    }

    /// Replaces a product, keeping its original `createdAt`.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] for unknown ids, [`CatalogError::DuplicateSku`] when the
    /// new SKU belongs to another product.
    pub async fn replace(&self, id: &str, mut product: Product) -> Result<Product, CatalogError> {
        let existing = self.get(id).await?;
        product.created_at = existing.created_at;

        self.collection
            .replace(id, &product)
            .await
            .map_err(|err| CatalogError::from_write(err, &product.sku))?
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    /// # Errors
    /// [`CatalogError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        if self.collection.delete(id).await.context("Deleting product")? {
            Ok(())
        } else {
            Err(CatalogError::product_not_found(id))
        }
    }
}

/// Curated product lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curation {
    /// Products featured in the storefront popup.
    Popup,
    /// Products on the sale page.
    SaleItems,
}

impl Curation {
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Popup => POPUP_PRODUCT_SELECTION,
            Self::SaleItems => SALE_ITEMS_SELECTION,
        }
    }

    #[must_use]
    pub const fn max_items(self) -> usize {
        match self {
            Self::Popup => 12,
            Self::SaleItems => 48,
        }
    }
}

/// Storage for one curated list singleton.
#[derive(Debug, Clone)]
pub struct CurationRepository {
    kind: Curation,
    collection: Collection,
}

impl CurationRepository {
    #[must_use]
    pub fn new(db: &Database, kind: Curation) -> Self {
        Self { kind, collection: db.collection(kind.table()) }
    }

    #[must_use]
    pub const fn kind(&self) -> Curation {
        self.kind
    }

    /// The saved selection, or an empty one.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn get(&self) -> Result<ProductSelection, CatalogError> {
        Ok(self
            .collection
            .get(SINGLETON_KEY)
            .await
            .context("Fetching product selection")?
            .unwrap_or_default())
    }

    /// # Errors
    /// Storage failures.
    pub async fn save(&self, selection: &ProductSelection) -> Result<ProductSelection, CatalogError> {
        self.collection.save(SINGLETON_KEY, selection).await.context("Saving product selection")
    }
}
