//! Catalog product records.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Color, Price, ProductId, Size};

/// Image path served when a product is created without one.
pub const DEFAULT_IMAGE: &str = "/static/images/default.svg";

/// A sellable product in the catalog.
///
/// Products are persisted as a JSON array; the whole array is rewritten on
/// every mutation (last write wins, single active process assumed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Timestamp-derived identifier, unique within one catalog file.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in USD.
    pub price: Price,
    /// Color facet.
    pub color: Color,
    /// Size facet.
    pub size: Size,
    /// Category facet, also the display grouping key.
    pub category: Category,
    /// Image URL or data URI.
    pub image: String,
    /// Units on hand. Never negative; purchases at zero are rejected.
    pub quantity: u32,
    /// Units sold, incremented by each purchase.
    #[serde(default)]
    pub sold: u32,
}

impl Product {
    /// Whether the product can currently be purchased.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Validation errors for [`NewProduct::validate`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ProductError {
    /// The product name is empty or whitespace.
    #[error("product name is required")]
    MissingName,
    /// The price is zero or negative.
    #[error("price must be greater than zero")]
    NonPositivePrice,
    /// The initial quantity is zero.
    #[error("available quantity must be at least 1")]
    NonPositiveQuantity,
}

/// Input for creating a product. The store assigns the id and applies the
/// default image fallback.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub color: Color,
    pub size: Size,
    pub category: Category,
    /// Optional image URL or data URI; empty means use the default.
    pub image: Option<String>,
    pub quantity: u32,
}

impl NewProduct {
    /// Validate the input against the admin form rules.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is blank, the price is not
    /// positive, or the quantity is zero.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::MissingName);
        }
        if !self.price.is_positive() {
            return Err(ProductError::NonPositivePrice);
        }
        if self.quantity == 0 {
            return Err(ProductError::NonPositiveQuantity);
        }
        Ok(())
    }

    /// Build the product record with the given id, applying the image
    /// fallback.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        let image = match self.image {
            Some(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_IMAGE.to_owned(),
        };
        Product {
            id,
            name: self.name,
            price: self.price,
            color: self.color,
            size: self.size,
            category: self.category,
            image,
            quantity: self.quantity,
            sold: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Test fixture used across the core crate's test modules.
    pub(crate) fn sample_product(id: i64, color: Color, size: Size, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Cap {id}"),
            price: "24.99".parse().unwrap(),
            color,
            size,
            category,
            image: DEFAULT_IMAGE.to_owned(),
            quantity: 5,
            sold: 0,
        }
    }

    fn valid_input() -> NewProduct {
        NewProduct {
            name: "Blitzing Cap".to_owned(),
            price: "29.99".parse().unwrap(),
            color: Color::Red,
            size: Size::Medium,
            category: Category::Sports,
            image: None,
            quantity: 3,
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut input = valid_input();
        input.name = "   ".to_owned();
        assert!(matches!(input.validate(), Err(ProductError::MissingName)));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut input = valid_input();
        input.quantity = 0;
        assert!(matches!(
            input.validate(),
            Err(ProductError::NonPositiveQuantity)
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let mut input = valid_input();
        input.price = "0".parse().unwrap();
        assert!(matches!(
            input.validate(),
            Err(ProductError::NonPositivePrice)
        ));
    }

    #[test]
    fn test_into_product_applies_image_fallback() {
        let product = valid_input().into_product(ProductId::new(1));
        assert_eq!(product.image, DEFAULT_IMAGE);
        assert_eq!(product.sold, 0);

        let mut input = valid_input();
        input.image = Some("https://cdn.example.com/cap.jpg".to_owned());
        let product = input.into_product(ProductId::new(2));
        assert_eq!(product.image, "https://cdn.example.com/cap.jpg");
    }

    #[test]
    fn test_product_json_roundtrip() {
        let product = sample_product(1, Color::Black, Size::Small, Category::Latest);
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_missing_sold_defaults_to_zero() {
        // Catalogs written before the sold counter existed omit the field.
        let json = r#"{
            "id": 3,
            "name": "Cap",
            "price": "10.00",
            "color": "black",
            "size": "small",
            "category": "latest",
            "image": "/static/images/default.svg",
            "quantity": 1
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.sold, 0);
    }
}
