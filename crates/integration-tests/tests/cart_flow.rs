//! Cart behavior across catalog changes, using real stores on disk.

#![allow(clippy::unwrap_used)]

use capstore_core::{Category, Color, NewProduct, Price, Size};
use capstore_integration_tests::TestDataDir;
use capstore_storefront::store::{CartStore, CatalogStore};

fn cap(name: &str, price: &str) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        price: price.parse::<Price>().unwrap(),
        color: Color::Black,
        size: Size::Large,
        category: Category::Casual,
        image: None,
        quantity: 4,
    }
}

#[test]
fn adding_the_same_cap_twice_merges_into_one_entry() {
    let dir = TestDataDir::new();
    let catalog = CatalogStore::new(dir.path());
    let cart = CartStore::new(dir.path());

    let product = catalog.add(cap("Dugout Snapback", "29.99")).unwrap();
    cart.add_or_increment(&product).unwrap();
    cart.add_or_increment(&product).unwrap();

    let entries = cart.load();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().unwrap().quantity, 2);
    assert_eq!(cart.item_count(), 2);
}

#[test]
fn cart_survives_restart_and_keeps_add_time_snapshots() {
    let dir = TestDataDir::new();

    {
        let catalog = CatalogStore::new(dir.path());
        let cart = CartStore::new(dir.path());
        let product = catalog.add(cap("Boulevard Dad Hat", "19.99")).unwrap();
        cart.add_or_increment(&product).unwrap();
    }

    let cart = CartStore::new(dir.path());
    let entries = cart.load();
    assert_eq!(entries.len(), 1);
    let entry = entries.first().unwrap();
    assert_eq!(entry.product.name, "Boulevard Dad Hat");
    assert_eq!(entry.product.price, "19.99".parse::<Price>().unwrap());
}

#[test]
fn entry_outlives_catalog_deletion() {
    let dir = TestDataDir::new();
    let catalog = CatalogStore::new(dir.path());
    let cart = CartStore::new(dir.path());

    let product = catalog.add(cap("Discontinued", "15.00")).unwrap();
    cart.add_or_increment(&product).unwrap();
    assert!(catalog.remove(product.id).unwrap());

    // The entry still renders from its snapshot; the catalog no longer
    // knows the id, which is how the cart page flags the row.
    let entries = cart.load();
    assert_eq!(entries.len(), 1);
    assert!(catalog.get(product.id).is_none());
}

#[test]
fn remove_and_clear_empty_the_cart() {
    let dir = TestDataDir::new();
    let catalog = CatalogStore::new(dir.path());
    let cart = CartStore::new(dir.path());

    let first = catalog.add(cap("First", "10.00")).unwrap();
    let second = catalog.add(cap("Second", "12.00")).unwrap();
    cart.add_or_increment(&first).unwrap();
    cart.add_or_increment(&second).unwrap();

    assert!(cart.remove(first.id).unwrap());
    assert_eq!(cart.load().len(), 1);

    cart.clear().unwrap();
    assert!(cart.load().is_empty());
    assert_eq!(cart.item_count(), 0);
}
