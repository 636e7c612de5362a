//! The cart store.

use std::path::Path;
use std::sync::Mutex;

use capstore_core::{CartEntry, Product, ProductId};

use super::{JsonFile, StoreError};

/// JSON-file-backed cart with an in-memory cache.
///
/// Entries hold product snapshots as of add-time and are not reconciled
/// against live catalog stock; the shop flags entries whose product has
/// since been deleted when rendering the cart.
#[derive(Debug)]
pub struct CartStore {
    file: JsonFile,
    cache: Mutex<Option<Vec<CartEntry>>>,
}

impl CartStore {
    /// Open the cart store under the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(data_dir, "cart", "cart.json"),
            cache: Mutex::new(None),
        }
    }

    /// Load all entries. Missing or malformed state yields an empty cart.
    #[must_use]
    pub fn load(&self) -> Vec<CartEntry> {
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(entries) = cache.as_ref() {
            return entries.clone();
        }
        let entries: Vec<CartEntry> = self.file.read();
        *cache = Some(entries.clone());
        entries
    }

    /// Total number of units across all entries (navbar badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.load().iter().map(|e| e.quantity).sum()
    }

    /// Add one unit of the product: increment an existing entry with the
    /// same product id, or append a new entry with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn add_or_increment(&self, product: &Product) -> Result<(), StoreError> {
        let mut entries = self.load();
        match entries.iter_mut().find(|e| e.product_id() == product.id) {
            Some(entry) => entry.quantity += 1,
            None => entries.push(CartEntry::new(product.clone())),
        }
        self.save(entries)
    }

    /// Remove the entry for the given product id.
    ///
    /// Returns `false` (and writes nothing) if no such entry exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn remove(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.product_id() != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(entries)?;
        Ok(true)
    }

    /// Drop every entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(Vec::new())
    }

    fn save(&self, entries: Vec<CartEntry>) -> Result<(), StoreError> {
        let result = self.file.write(&entries);
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *cache = match &result {
            Ok(()) => Some(entries),
            Err(_) => None,
        };
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use capstore_core::{Category, Color, Price, Size};

    use super::super::test_support::TempDataDir;
    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Cap {id}"),
            price: "19.99".parse::<Price>().unwrap(),
            color: Color::Red,
            size: Size::Small,
            category: Category::Sports,
            image: capstore_core::product::DEFAULT_IMAGE.to_owned(),
            quantity: 3,
            sold: 0,
        }
    }

    #[test]
    fn test_same_product_twice_merges_into_one_entry() {
        let dir = TempDataDir::new();
        let store = CartStore::new(&dir.0);
        let cap = product(1);

        store.add_or_increment(&cap).unwrap();
        store.add_or_increment(&cap).unwrap();

        let entries = store.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().unwrap().quantity, 2);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_distinct_products_get_distinct_entries() {
        let dir = TempDataDir::new();
        let store = CartStore::new(&dir.0);

        store.add_or_increment(&product(1)).unwrap();
        store.add_or_increment(&product(2)).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_cart_persists_across_instances() {
        let dir = TempDataDir::new();
        let store = CartStore::new(&dir.0);
        store.add_or_increment(&product(1)).unwrap();

        let reopened = CartStore::new(&dir.0);
        assert_eq!(reopened.item_count(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let dir = TempDataDir::new();
        let store = CartStore::new(&dir.0);
        store.add_or_increment(&product(1)).unwrap();

        assert!(store.remove(ProductId::new(1)).unwrap());
        assert!(!store.remove(ProductId::new(1)).unwrap());
        assert!(store.load().is_empty());
    }
}
