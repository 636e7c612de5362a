//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! GET  /intro                  - Product introduction page
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action (admin or customer)
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Shop (requires customer session)
//! GET  /shop                   - Filtered, grouped catalog
//! POST /shop/buy               - Buy one unit
//!
//! # Cart (requires customer session)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart
//! POST /cart/remove            - Remove cart entry
//!
//! # Profile (requires customer session)
//! GET  /profile                - Profile form
//! POST /profile                - Save profile (multipart, optional photo)
//!
//! # Admin (requires admin session)
//! GET  /admin                  - Dashboard with catalog table and add form
//! POST /admin/products         - Add a product (multipart, optional image)
//! POST /admin/products/{id}/delete - Remove a product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod profile;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for flash-style notice/error display after a redirect.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/buy", post(shop::buy))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/products", post(admin::create_product))
        .route("/products/{id}/delete", post(admin::delete_product))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(home::landing))
        .route("/intro", get(home::intro))
        // Auth routes
        .nest("/auth", auth_routes())
        // Customer pages
        .nest("/shop", shop_routes())
        .nest("/cart", cart_routes())
        .route("/profile", get(profile::edit).post(profile::save))
        // Admin pages
        .nest("/admin", admin_routes())
}
