//! End-to-end catalog store behavior against a real data directory.

#![allow(clippy::unwrap_used)]

use capstore_core::{Category, Color, NewProduct, Price, ProductError, ProductId, Size};
use capstore_integration_tests::TestDataDir;
use capstore_storefront::store::{CatalogError, CatalogStore, PurchaseOutcome};

fn cap(name: &str, quantity: u32) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        price: "24.99".parse::<Price>().unwrap(),
        color: Color::Red,
        size: Size::Medium,
        category: Category::Sports,
        image: None,
        quantity,
    }
}

#[test]
fn catalog_round_trips_through_the_file() {
    let dir = TestDataDir::new();

    let added = {
        let store = CatalogStore::new(dir.path());
        store.add(cap("Court Classic", 5)).unwrap()
    };

    // A brand-new store instance sees exactly what was persisted.
    let store = CatalogStore::new(dir.path());
    let products = store.load();
    assert_eq!(products, vec![added.clone()]);
    assert_eq!(products.first().unwrap().image, "/static/images/default.svg");

    // The file itself is a JSON array of product objects.
    let raw = std::fs::read_to_string(dir.path().join("catalog.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["name"], "Court Classic");
    assert_eq!(parsed[0]["id"], added.id.as_i64());
}

#[test]
fn zero_quantity_is_rejected_and_nothing_is_written() {
    let dir = TestDataDir::new();
    let store = CatalogStore::new(dir.path());

    let result = store.add(cap("Ghost Cap", 0));
    assert!(matches!(
        result,
        Err(CatalogError::Invalid(ProductError::NonPositiveQuantity))
    ));
    assert!(!dir.path().join("catalog.json").exists());
}

#[test]
fn purchases_drain_stock_and_stop_at_zero() {
    let dir = TestDataDir::new();
    let store = CatalogStore::new(dir.path());
    let product = store.add(cap("Last One", 2)).unwrap();

    assert!(matches!(
        store.purchase(product.id).unwrap(),
        PurchaseOutcome::Purchased(p) if p.quantity == 1 && p.sold == 1
    ));
    assert!(matches!(
        store.purchase(product.id).unwrap(),
        PurchaseOutcome::Purchased(p) if p.quantity == 0 && p.sold == 2
    ));

    // At zero stock the purchase is refused and counters stay put.
    assert_eq!(store.purchase(product.id).unwrap(), PurchaseOutcome::OutOfStock);
    let current = store.get(product.id).unwrap();
    assert_eq!(current.quantity, 0);
    assert_eq!(current.sold, 2);
    assert!(!current.in_stock());
}

#[test]
fn purchase_of_deleted_product_reports_not_found() {
    let dir = TestDataDir::new();
    let store = CatalogStore::new(dir.path());
    let product = store.add(cap("Short Lived", 3)).unwrap();

    assert!(store.remove(product.id).unwrap());
    assert_eq!(store.purchase(product.id).unwrap(), PurchaseOutcome::NotFound);
}

#[test]
fn corrupted_catalog_file_reads_as_empty() {
    let dir = TestDataDir::new();
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(dir.path().join("catalog.json"), b"[{\"id\": oops").unwrap();

    let store = CatalogStore::new(dir.path());
    assert!(store.load().is_empty());
    assert!(store.get(ProductId::new(1)).is_none());

    // The store is still usable for writes after the bad read.
    store.add(cap("Recovery", 1)).unwrap();
    assert_eq!(store.load().len(), 1);
}
