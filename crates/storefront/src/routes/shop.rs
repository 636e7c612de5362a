//! Shop page: the filtered, category-grouped catalog, plus direct purchase.
//!
//! Facet selections arrive as repeated query parameters
//! (`?color=red&color=black&size=small`), which `serde_urlencoded` cannot
//! collect into `Vec`s, so the raw query string is parsed by hand.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use capstore_core::{Category, Color, FacetFilter, Product, Size, group_by_category};

use crate::error::Result;
use crate::filters;
use crate::session::RequireCustomer;
use crate::state::AppState;
use crate::store::PurchaseOutcome;

// =============================================================================
// View Types
// =============================================================================

/// Product display data for the shop grid.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
    pub sold: u32,
    pub in_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            quantity: product.quantity,
            sold: product.sold,
            in_stock: product.in_stock(),
        }
    }
}

/// One rendered category section.
pub struct GroupView {
    pub label: &'static str,
    pub products: Vec<ProductView>,
}

/// One checkbox in the facet sidebar.
pub struct FacetOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub groups: Vec<GroupView>,
    pub colors: Vec<FacetOption>,
    pub sizes: Vec<FacetOption>,
    pub categories: Vec<FacetOption>,
    pub cart_count: u32,
    pub customer_email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

// =============================================================================
// Shop Page
// =============================================================================

/// Display the shop page, narrowed by any facet selections in the query.
#[instrument(skip(state, customer))]
pub async fn index(
    State(state): State<AppState>,
    RequireCustomer(customer): RequireCustomer,
    RawQuery(raw_query): RawQuery,
) -> impl IntoResponse {
    let query = raw_query.unwrap_or_default();
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    let filter = FacetFilter::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    // Flash messages ride along in the same query string.
    let mut error = None;
    let mut notice = None;
    for (key, value) in &pairs {
        match key.as_str() {
            "error" => error = Some(value.clone()),
            "notice" => notice = Some(value.clone()),
            _ => {}
        }
    }

    let products = state.catalog().load();
    let matched = filter.apply(&products);
    let groups = group_by_category(&matched)
        .into_iter()
        .map(|group| GroupView {
            label: group.category.label(),
            products: group.products.into_iter().map(ProductView::from).collect(),
        })
        .collect();

    ShopTemplate {
        groups,
        colors: facet_options(Color::ALL, &filter.colors, |c| (c.as_str(), c.label())),
        sizes: facet_options(Size::ALL, &filter.sizes, |s| (s.as_str(), s.label())),
        categories: facet_options(Category::ALL, &filter.categories, |c| {
            (c.as_str(), c.label())
        }),
        cart_count: state.cart().item_count(),
        customer_email: customer.email.into_inner(),
        error,
        notice,
    }
}

// =============================================================================
// Buy
// =============================================================================

/// Buy form data.
#[derive(Debug, Deserialize)]
pub struct BuyForm {
    pub id: i64,
}

/// Purchase one unit of a product directly from the shop page.
#[instrument(skip(state, _customer))]
pub async fn buy(
    State(state): State<AppState>,
    _customer: RequireCustomer,
    Form(form): Form<BuyForm>,
) -> Result<Response> {
    let outcome = state.catalog().purchase(form.id.into())?;
    let url = match outcome {
        PurchaseOutcome::Purchased(product) => format!(
            "/shop?notice={}",
            urlencoding::encode(&format!("Purchased {}", product.name))
        ),
        PurchaseOutcome::OutOfStock => format!(
            "/shop?error={}",
            urlencoding::encode("That product is out of stock")
        ),
        PurchaseOutcome::NotFound => format!(
            "/shop?error={}",
            urlencoding::encode("That product is no longer available")
        ),
    };
    Ok(Redirect::to(&url).into_response())
}

/// Build the checkbox list for one facet dimension.
fn facet_options<T: Copy + PartialEq>(
    all: &'static [T],
    selected: &[T],
    strings: impl Fn(T) -> (&'static str, &'static str),
) -> Vec<FacetOption> {
    all.iter()
        .map(|&value| {
            let (value_str, label) = strings(value);
            FacetOption {
                value: value_str,
                label,
                checked: selected.contains(&value),
            }
        })
        .collect()
}
