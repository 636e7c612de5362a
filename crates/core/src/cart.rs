//! Cart entries.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// One line in a customer's cart.
///
/// The embedded product is a snapshot taken when the entry was created:
/// price and availability are "as of add-time" and are not reconciled
/// against the live catalog. The shop flags entries whose product has since
/// been deleted instead of silently dropping them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartEntry {
    /// Product snapshot at add time.
    pub product: Product,
    /// How many units of this product are in the cart.
    pub quantity: u32,
}

impl CartEntry {
    /// Create an entry for one unit of the given product.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The id of the snapshotted product.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }
}
