//! The catalog store: the full collection of sellable products.

use std::path::Path;
use std::sync::Mutex;

use capstore_core::{NewProduct, Product, ProductError, ProductId};
use thiserror::Error;

use super::{JsonFile, StoreError};

/// Errors from catalog mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The new product failed the admin form rules.
    #[error(transparent)]
    Invalid(#[from] ProductError),
    /// The catalog file could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// One unit was purchased; the updated product is returned.
    Purchased(Product),
    /// The product exists but has no stock; state is unchanged.
    OutOfStock,
    /// No product with the given id exists.
    NotFound,
}

/// JSON-file-backed product catalog with an in-memory cache.
#[derive(Debug)]
pub struct CatalogStore {
    file: JsonFile,
    cache: Mutex<Option<Vec<Product>>>,
}

impl CatalogStore {
    /// Open the catalog store under the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(data_dir, "catalog", "catalog.json"),
            cache: Mutex::new(None),
        }
    }

    /// Load all products. Missing or malformed state yields an empty catalog.
    #[must_use]
    pub fn load(&self) -> Vec<Product> {
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(products) = cache.as_ref() {
            return products.clone();
        }
        let products: Vec<Product> = self.file.read();
        *cache = Some(products.clone());
        products
    }

    /// Look up one product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// Serialize the full product list, overwriting prior state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be written; the cache is
    /// invalidated so the next read reflects what is actually on disk.
    pub fn save(&self, products: Vec<Product>) -> Result<(), StoreError> {
        let result = self.file.write(&products);
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *cache = match &result {
            Ok(()) => Some(products),
            Err(_) => None,
        };
        result
    }

    /// Validate and append a new product with a generated id.
    ///
    /// Ids derive from the current Unix millisecond timestamp and are bumped
    /// until unique within this catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if validation fails (nothing is
    /// appended) or [`CatalogError::Store`] if persisting fails.
    pub fn add(&self, input: NewProduct) -> Result<Product, CatalogError> {
        input.validate()?;

        let mut products = self.load();
        let mut id = ProductId::new(chrono::Utc::now().timestamp_millis());
        while products.iter().any(|p| p.id == id) {
            id = id.next();
        }

        let product = input.into_product(id);
        products.push(product.clone());
        self.save(products)?;
        Ok(product)
    }

    /// Remove the product with the given id.
    ///
    /// Returns `false` (and writes nothing) if no such product exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn remove(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut products = self.load();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }
        self.save(products)?;
        Ok(true)
    }

    /// Apply a stock adjustment: `delta` to quantity, `sold_delta` to sold.
    ///
    /// Both counters clamp at zero instead of going negative. Returns the
    /// updated product, or `None` if no such product exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn adjust_stock(
        &self,
        id: ProductId,
        delta: i64,
        sold_delta: i64,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.load();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        product.quantity = apply_delta(product.quantity, delta);
        product.sold = apply_delta(product.sold, sold_delta);
        let updated = product.clone();
        self.save(products)?;
        Ok(Some(updated))
    }

    /// Purchase one unit: quantity - 1, sold + 1.
    ///
    /// A purchase at zero stock leaves state unchanged and signals
    /// out-of-stock; quantity can never go negative.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn purchase(&self, id: ProductId) -> Result<PurchaseOutcome, StoreError> {
        let Some(product) = self.get(id) else {
            return Ok(PurchaseOutcome::NotFound);
        };
        if product.quantity == 0 {
            return Ok(PurchaseOutcome::OutOfStock);
        }

        match self.adjust_stock(id, -1, 1)? {
            Some(updated) => Ok(PurchaseOutcome::Purchased(updated)),
            // Deleted between the check and the adjustment; single-process
            // callers never see this.
            None => Ok(PurchaseOutcome::NotFound),
        }
    }
}

/// Add a signed delta to a counter, clamping at zero.
fn apply_delta(value: u32, delta: i64) -> u32 {
    u32::try_from(i64::from(value).saturating_add(delta).max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use capstore_core::{Category, Color, Price, Size};

    use super::super::test_support::TempDataDir;
    use super::*;

    fn input(name: &str, quantity: u32) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price: "24.99".parse::<Price>().unwrap(),
            color: Color::Black,
            size: Size::Medium,
            category: Category::Latest,
            image: None,
            quantity,
        }
    }

    #[test]
    fn test_load_empty_on_first_run() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_and_remove_persist_across_instances() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);

        let kept = store.add(input("Kept", 2)).unwrap();
        let dropped = store.add(input("Dropped", 1)).unwrap();
        assert_ne!(kept.id, dropped.id);
        assert!(store.remove(dropped.id).unwrap());

        // A fresh instance reads the same state back from disk.
        let reopened = CatalogStore::new(&dir.0);
        assert_eq!(reopened.load(), vec![kept]);
    }

    #[test]
    fn test_add_rejects_zero_quantity_without_appending() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);

        let result = store.add(input("No stock", 0));
        assert!(matches!(
            result,
            Err(CatalogError::Invalid(ProductError::NonPositiveQuantity))
        ));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);
        assert!(!store.remove(ProductId::new(404)).unwrap());
    }

    #[test]
    fn test_purchase_decrements_quantity_and_increments_sold() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);
        let product = store.add(input("Cap", 1)).unwrap();

        match store.purchase(product.id).unwrap() {
            PurchaseOutcome::Purchased(updated) => {
                assert_eq!(updated.quantity, 0);
                assert_eq!(updated.sold, 1);
            }
            other => panic!("expected purchase, got {other:?}"),
        }

        // Second purchase hits zero stock: state unchanged.
        assert_eq!(store.purchase(product.id).unwrap(), PurchaseOutcome::OutOfStock);
        let current = store.get(product.id).unwrap();
        assert_eq!(current.quantity, 0);
        assert_eq!(current.sold, 1);
    }

    #[test]
    fn test_adjust_stock_clamps_at_zero() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);
        let product = store.add(input("Cap", 2)).unwrap();

        let updated = store.adjust_stock(product.id, -5, 0).unwrap().unwrap();
        assert_eq!(updated.quantity, 0);

        // Restocks work the same way in reverse.
        let restocked = store.adjust_stock(product.id, 10, 0).unwrap().unwrap();
        assert_eq!(restocked.quantity, 10);

        assert!(store.adjust_stock(ProductId::new(404), 1, 0).unwrap().is_none());
    }

    #[test]
    fn test_purchase_unknown_id() {
        let dir = TempDataDir::new();
        let store = CatalogStore::new(&dir.0);
        assert_eq!(
            store.purchase(ProductId::new(404)).unwrap(),
            PurchaseOutcome::NotFound
        );
    }

    #[test]
    fn test_malformed_catalog_fails_soft_to_empty() {
        let dir = TempDataDir::new();
        std::fs::create_dir_all(&dir.0).unwrap();
        std::fs::write(dir.0.join("catalog.json"), b"[{broken").unwrap();

        let store = CatalogStore::new(&dir.0);
        assert!(store.load().is_empty());
    }
}
