//! Session state and authentication extractors.
//!
//! The logged-in customer marker and the admin flag live in the server-side
//! session; nothing about login state is ever trusted from the client.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use capstore_core::Email;

/// Session keys.
pub mod keys {
    /// Key for the logged-in customer marker.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the admin flag, set only via the configured admin credential.
    pub const ADMIN: &str = "admin";
}

/// Session-stored customer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// The customer's email address.
    pub email: Email,
}

/// Rejection for the auth extractors: back to the login page.
pub struct RedirectToLogin;

impl IntoResponse for RedirectToLogin {
    fn into_response(self) -> Response {
        Redirect::to("/auth/login").into_response()
    }
}

/// Extractor that requires a logged-in customer.
pub struct RequireCustomer(pub CurrentCustomer);

impl<S> FromRequestParts<S> for RequireCustomer
where
    S: Send + Sync,
{
    type Rejection = RedirectToLogin;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().ok_or(RedirectToLogin)?;
        let customer: CurrentCustomer = session
            .get(keys::CURRENT_CUSTOMER)
            .await
            .ok()
            .flatten()
            .ok_or(RedirectToLogin)?;
        Ok(Self(customer))
    }
}

/// Extractor that requires the admin session flag.
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = RedirectToLogin;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().ok_or(RedirectToLogin)?;
        let is_admin: bool = session
            .get(keys::ADMIN)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);
        if is_admin { Ok(Self) } else { Err(RedirectToLogin) }
    }
}

/// Mark the session as a logged-in customer.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn login_customer(
    session: &Session,
    email: Email,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(keys::CURRENT_CUSTOMER, CurrentCustomer { email })
        .await
}

/// Mark the session as the admin.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn login_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ADMIN, true).await
}

/// Destroy the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn logout(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
