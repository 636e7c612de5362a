//! Cart route handlers.
//!
//! Entries hold the product as it looked when added. The catalog is only
//! consulted at render time, to flag entries whose product has since been
//! removed by the admin.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use capstore_core::{CartEntry, Price, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::session::RequireCustomer;
use crate::state::AppState;

use super::MessageQuery;

// =============================================================================
// View Types
// =============================================================================

/// One cart line for the template.
pub struct CartItemView {
    pub product_id: i64,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    /// The product was removed from the catalog after this entry was added.
    pub orphaned: bool,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub cart_count: u32,
    pub error: Option<String>,
    pub notice: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, _customer))]
pub async fn show(
    State(state): State<AppState>,
    _customer: RequireCustomer,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let entries = state.cart().load();
    let catalog_ids: Vec<ProductId> = state.catalog().load().iter().map(|p| p.id).collect();

    let subtotal: Decimal = entries
        .iter()
        .map(|e| e.product.price.amount() * Decimal::from(e.quantity))
        .sum();

    let items = entries
        .iter()
        .map(|entry| item_view(entry, &catalog_ids))
        .collect();

    CartTemplate {
        items,
        subtotal: Price::new(subtotal).display(),
        cart_count: state.cart().item_count(),
        error: query.error,
        notice: query.notice,
    }
}

fn item_view(entry: &CartEntry, catalog_ids: &[ProductId]) -> CartItemView {
    let line_total = entry.product.price.amount() * Decimal::from(entry.quantity);
    CartItemView {
        product_id: entry.product.id.as_i64(),
        name: entry.product.name.clone(),
        image: entry.product.image.clone(),
        unit_price: entry.product.price.display(),
        quantity: entry.quantity,
        line_total: Price::new(line_total).display(),
        orphaned: !catalog_ids.contains(&entry.product.id),
    }
}

/// Cart mutation form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub id: i64,
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, _customer))]
pub async fn add(
    State(state): State<AppState>,
    _customer: RequireCustomer,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.id);
    let Some(product) = state.catalog().get(id) else {
        return Err(AppError::NotFound(format!("product {id}")));
    };

    if !product.in_stock() {
        let url = format!(
            "/shop?error={}",
            urlencoding::encode("That product is out of stock")
        );
        return Ok(Redirect::to(&url).into_response());
    }

    state.cart().add_or_increment(&product)?;
    let url = format!(
        "/shop?notice={}",
        urlencoding::encode(&format!("Added {} to your cart", product.name))
    );
    Ok(Redirect::to(&url).into_response())
}

/// Remove an entry from the cart.
#[instrument(skip(state, _customer))]
pub async fn remove(
    State(state): State<AppState>,
    _customer: RequireCustomer,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    state.cart().remove(ProductId::new(form.id))?;
    Ok(Redirect::to("/cart").into_response())
}
