//! Admin dashboard route handlers.
//!
//! Gated by the admin session flag, which only the configured credential can
//! set. The dashboard lists the catalog with stock and sales counters and
//! carries the add-product form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use capstore_core::{Category, Color, NewProduct, Price, ProductId, Size};

use crate::error::{AppError, Result};
use crate::filters;
use crate::session::RequireAdmin;
use crate::state::AppState;
use crate::store::CatalogError;
use crate::upload;

use super::MessageQuery;

// =============================================================================
// View Types
// =============================================================================

/// One catalog row on the dashboard.
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub color: &'static str,
    pub size: &'static str,
    pub category: &'static str,
    pub image: String,
    pub quantity: u32,
    pub sold: u32,
}

/// One `<option>` in the add-product form selects.
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub products: Vec<ProductRow>,
    pub colors: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Display the admin dashboard.
#[instrument(skip(state, _admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let products = state
        .catalog()
        .load()
        .iter()
        .map(|p| ProductRow {
            id: p.id.as_i64(),
            name: p.name.clone(),
            price: p.price.display(),
            color: p.color.label(),
            size: p.size.label(),
            category: p.category.label(),
            image: p.image.clone(),
            quantity: p.quantity,
            sold: p.sold,
        })
        .collect();

    DashboardTemplate {
        products,
        colors: select_options(Color::ALL.iter().map(|c| (c.as_str(), c.label()))),
        sizes: select_options(Size::ALL.iter().map(|s| (s.as_str(), s.label()))),
        categories: select_options(Category::ALL.iter().map(|c| (c.as_str(), c.label()))),
        error: query.error,
        notice: query.notice,
    }
}

fn select_options(
    values: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> Vec<SelectOption> {
    values
        .into_iter()
        .map(|(value, label)| SelectOption { value, label })
        .collect()
}

// =============================================================================
// Create Product
// =============================================================================

/// Partially parsed add-product form.
#[derive(Default)]
struct ProductForm {
    name: String,
    price: Option<Price>,
    color: Option<Color>,
    size: Option<Size>,
    category: Option<Category>,
    quantity: Option<u32>,
    image: Option<String>,
}

/// Handle the add-product form.
///
/// Multipart because of the optional image upload; a missing image falls
/// back to the bundled placeholder.
#[instrument(skip(state, _admin, multipart))]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    mut multipart: Multipart,
) -> Result<Response> {
    let form = read_product_form(&mut multipart).await?;

    let input = NewProduct {
        name: form.name,
        price: form
            .price
            .ok_or_else(|| AppError::Validation("price must be a decimal number".to_owned()))?,
        color: form
            .color
            .ok_or_else(|| AppError::Validation("a color must be selected".to_owned()))?,
        size: form
            .size
            .ok_or_else(|| AppError::Validation("a size must be selected".to_owned()))?,
        category: form
            .category
            .ok_or_else(|| AppError::Validation("a category must be selected".to_owned()))?,
        image: form.image,
        quantity: form
            .quantity
            .ok_or_else(|| AppError::Validation("quantity must be a whole number".to_owned()))?,
    };

    match state.catalog().add(input) {
        Ok(product) => {
            let url = format!(
                "/admin?notice={}",
                urlencoding::encode(&format!("Added {}", product.name))
            );
            Ok(Redirect::to(&url).into_response())
        }
        Err(CatalogError::Invalid(e)) => {
            let url = format!("/admin?error={}", urlencoding::encode(&e.to_string()));
            Ok(Redirect::to(&url).into_response())
        }
        Err(CatalogError::Store(e)) => Err(e.into()),
    }
}

async fn read_product_form(multipart: &mut Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid form data: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        if name == "image" {
            let content_type = field.content_type().unwrap_or_default().to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("invalid image upload: {e}")))?;
            if bytes.is_empty() {
                continue;
            }
            form.image = Some(
                upload::to_data_uri(&content_type, &bytes)
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            );
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("invalid {name} field: {e}")))?;
        match name.as_str() {
            "name" => form.name = text.trim().to_owned(),
            // Unparseable values stay None and fail validation above with a
            // field-specific message.
            "price" => form.price = text.parse().ok(),
            "color" => form.color = text.parse().ok(),
            "size" => form.size = text.parse().ok(),
            "category" => form.category = text.parse().ok(),
            "quantity" => form.quantity = text.trim().parse().ok(),
            _ => {}
        }
    }

    Ok(form)
}

// =============================================================================
// Delete Product
// =============================================================================

/// Remove a product from the catalog.
#[instrument(skip(state, _admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Response> {
    let removed = state.catalog().remove(ProductId::new(id))?;
    let url = if removed {
        format!("/admin?notice={}", urlencoding::encode("Product removed"))
    } else {
        format!(
            "/admin?error={}",
            urlencoding::encode("No such product to remove")
        )
    };
    Ok(Redirect::to(&url).into_response())
}
