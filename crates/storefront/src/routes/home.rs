//! Landing and product introduction pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use capstore_core::{Category, Product};

use crate::filters;
use crate::state::AppState;

/// Product display data for the landing teaser grid.
#[derive(Clone)]
pub struct TeaserView {
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for TeaserView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
        }
    }
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct LandingTemplate {
    /// A teaser of the newest caps, shown without requiring a login.
    pub latest: Vec<TeaserView>,
}

/// Number of products to tease on the landing page.
const LANDING_TEASER_COUNT: usize = 4;

/// Display the landing page.
#[instrument(skip(state))]
pub async fn landing(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog().load();
    let latest = products
        .iter()
        .filter(|p| p.category == Category::Latest)
        .take(LANDING_TEASER_COUNT)
        .map(TeaserView::from)
        .collect();

    LandingTemplate { latest }
}

/// Product introduction page template.
#[derive(Template, WebTemplate)]
#[template(path = "intro.html")]
pub struct IntroTemplate;

/// Display the product introduction page.
pub async fn intro() -> impl IntoResponse {
    IntroTemplate
}
