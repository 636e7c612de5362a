//! Seed the catalog store with a starter set of caps.

use std::path::Path;

use tracing::info;

use capstore_core::{Category, Color, NewProduct, Price, Size};
use capstore_storefront::store::CatalogStore;

/// One seed row: name, price, color, size, category, quantity.
type SeedRow = (&'static str, &'static str, Color, Size, Category, u32);

/// Starter catalog covering every category and a spread of colors and sizes.
const SEED_PRODUCTS: &[SeedRow] = &[
    ("Court Classic", "24.99", Color::Red, Size::Medium, Category::Sports, 12),
    ("Dugout Snapback", "29.99", Color::Black, Size::Large, Category::Sports, 8),
    ("Boulevard Dad Hat", "19.99", Color::Brown, Size::All, Category::Casual, 15),
    ("Porch Swing", "18.50", Color::Green, Size::Small, Category::Casual, 10),
    ("Runway Fitted", "39.99", Color::White, Size::Medium, Category::Fashion, 5),
    ("Monochrome Five-Panel", "34.00", Color::Black, Size::Small, Category::Fashion, 7),
    ("First Drop", "27.50", Color::Red, Size::Large, Category::Latest, 20),
    ("Night Shift", "26.00", Color::Black, Size::Medium, Category::Latest, 14),
];

/// Seed the catalog under `data_dir`.
///
/// Refuses to touch a non-empty catalog unless `force` is set; with `force`
/// the existing catalog is replaced wholesale.
///
/// # Errors
///
/// Returns an error if the catalog cannot be persisted or a seed row fails
/// validation.
pub fn catalog(data_dir: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = CatalogStore::new(data_dir);

    let existing = store.load();
    if !existing.is_empty() {
        if !force {
            return Err(format!(
                "catalog already has {} products; pass --force to replace it",
                existing.len()
            )
            .into());
        }
        info!(count = existing.len(), "Replacing existing catalog");
        store.save(Vec::new())?;
    }

    for &(name, price, color, size, category, quantity) in SEED_PRODUCTS {
        let product = store.add(NewProduct {
            name: name.to_owned(),
            price: price.parse::<Price>()?,
            color,
            size,
            category,
            image: None,
            quantity,
        })?;
        info!(id = product.id.as_i64(), name = %product.name, "Seeded product");
    }

    info!(
        count = SEED_PRODUCTS.len(),
        data_dir = %data_dir.display(),
        "Catalog seeded"
    );
    Ok(())
}
