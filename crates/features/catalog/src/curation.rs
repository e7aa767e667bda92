use crate::CatalogInner;
use crate::error::CatalogError;
use crate::model::{Product, ProductSelection};
use crate::repository::{Curation, CurationRepository};
use atelier_kernel::domain::constants::PRODUCT;
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::time;
use fxhash::FxHashSet;

impl CatalogInner {
    #[must_use]
    pub const fn curation(&self, kind: Curation) -> &CurationRepository {
        match kind {
            Curation::Popup => &self.popup,
            Curation::SaleItems => &self.sale_items,
        }
    }

    /// Products of a curated list in list order; deleted products are skipped.
    ///
    /// # Errors
    /// Storage failures.
    pub async fn curated_products(&self, kind: Curation) -> Result<Vec<Product>, CatalogError> {
        let selection = self.curation(kind).get().await?;
        self.products.get_ordered(&selection.product_ids).await
    }

    /// Replaces a curated list.
    ///
    /// # Errors
    /// [`CatalogError::InvalidSelection`] when the list is too long, repeats an id, or names
    /// a product that does not exist.
    pub async fn curate(&self, kind: Curation, ids: Vec<String>) -> Result<ProductSelection, CatalogError> {
        if ids.len() > kind.max_items() {
            return Err(invalid(format!("productIds must contain at most {} items", kind.max_items())));
        }

        let mut seen = FxHashSet::default();
        let mut product_ids = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = ResourceGuard::verify(&raw, PRODUCT).map_err(|err| invalid(err.to_string()))?;
            if !seen.insert(id.clone()) {
                return Err(invalid(format!("Duplicate product id '{id}'")));
            }
            product_ids.push(id);
        }

        let missing = self.products.missing(&product_ids).await?;
        if !missing.is_empty() {
            return Err(invalid(format!("Unknown product ids: {}", missing.join(", "))));
        }

        self.curation(kind).save(&ProductSelection { product_ids, updated_at: time::now() }).await
    }
}

fn invalid(message: String) -> CatalogError {
    CatalogError::InvalidSelection { message: message.into(), context: None }
}
