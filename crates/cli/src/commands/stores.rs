//! Inspect and reset the JSON stores.

use std::path::Path;

use tracing::info;

use capstore_core::Profile;
use capstore_storefront::store::{CartStore, CatalogStore, ProfileStore};

use crate::ClearTarget;

/// Summarize what each store currently holds.
pub fn show(data_dir: &Path) {
    let catalog = CatalogStore::new(data_dir);
    let cart = CartStore::new(data_dir);
    let profile = ProfileStore::new(data_dir);

    info!(data_dir = %data_dir.display(), "Store summary");

    let products = catalog.load();
    let total_stock: u32 = products.iter().map(|p| p.quantity).sum();
    let total_sold: u32 = products.iter().map(|p| p.sold).sum();
    info!(
        products = products.len(),
        in_stock = total_stock,
        sold = total_sold,
        "Catalog"
    );
    for product in &products {
        info!(
            id = product.id.as_i64(),
            name = %product.name,
            price = %product.price,
            quantity = product.quantity,
            sold = product.sold,
            "  product"
        );
    }

    let entries = cart.load();
    info!(entries = entries.len(), units = cart.item_count(), "Cart");

    let stored = profile.load();
    info!(
        name = %stored.name,
        has_photo = stored.has_photo(),
        "Profile"
    );
}

/// Reset the selected store(s) to their empty state.
///
/// # Errors
///
/// Returns an error if a store cannot be persisted.
pub fn clear(data_dir: &Path, target: ClearTarget) -> Result<(), Box<dyn std::error::Error>> {
    match target {
        ClearTarget::Catalog => clear_catalog(data_dir)?,
        ClearTarget::Cart => clear_cart(data_dir)?,
        ClearTarget::Profile => clear_profile(data_dir)?,
        ClearTarget::All => {
            clear_catalog(data_dir)?;
            clear_cart(data_dir)?;
            clear_profile(data_dir)?;
        }
    }
    Ok(())
}

fn clear_catalog(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    CatalogStore::new(data_dir).save(Vec::new())?;
    info!("Catalog cleared");
    Ok(())
}

fn clear_cart(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    CartStore::new(data_dir).clear()?;
    info!("Cart cleared");
    Ok(())
}

fn clear_profile(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    ProfileStore::new(data_dir).save(Profile::default())?;
    info!("Profile cleared");
    Ok(())
}
