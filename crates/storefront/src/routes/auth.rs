//! Authentication route handlers.
//!
//! One login form serves both roles: the configured admin credential lands
//! on the admin dashboard, a verified customer account lands on the shop.
//! Failures redirect back with a human-readable message in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::services::auth::{AuthError, AuthService, Authenticated, RegistrationDetails};
use crate::session::{login_admin, login_customer, logout as destroy_session};
use crate::state::AppState;

use super::MessageQuery;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        notice: query.notice,
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.accounts(), &state.config().admin);

    match auth.login(&form.email, &form.password).await {
        Ok(Authenticated::Admin) => {
            if let Err(e) = login_admin(&session).await {
                tracing::error!("Failed to set admin session: {e}");
                return login_redirect_error("Could not start a session");
            }
            Redirect::to("/admin").into_response()
        }
        Ok(Authenticated::Customer(account)) => {
            if let Err(e) = login_customer(&session, account.email).await {
                tracing::error!("Failed to set customer session: {e}");
                return login_redirect_error("Could not start a session");
            }
            Redirect::to("/shop").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed for submitted email");
            login_redirect_error("Invalid email or password")
        }
        Err(e) => {
            tracing::error!("Login error: {e}");
            login_redirect_error("Login is unavailable right now, try again later")
        }
    }
}

fn login_redirect_error(message: &str) -> Response {
    let url = format!("/auth/login?error={}", urlencoding::encode(message));
    Redirect::to(&url).into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.password != form.password_confirm {
        return register_redirect_error("Passwords do not match");
    }

    let auth = AuthService::new(state.accounts(), &state.config().admin);
    let details = RegistrationDetails {
        first_name: none_if_blank(form.first_name),
        last_name: none_if_blank(form.last_name),
        phone: none_if_blank(form.phone),
    };

    match auth.register(&form.email, &form.password, details).await {
        Ok(_) => {
            let url = format!(
                "/auth/login?notice={}",
                urlencoding::encode("Account created, you can sign in now")
            );
            Redirect::to(&url).into_response()
        }
        Err(AuthError::DuplicateEmail) => {
            register_redirect_error("An account with this email already exists")
        }
        Err(e @ (AuthError::InvalidEmail(_) | AuthError::WeakPassword(_))) => {
            register_redirect_error(&e.to_string())
        }
        Err(e) => {
            tracing::error!("Registration error: {e}");
            register_redirect_error(&format!("Registration failed: {e}"))
        }
    }
}

fn register_redirect_error(message: &str) -> Response {
    let url = format!("/auth/register?error={}", urlencoding::encode(message));
    Redirect::to(&url).into_response()
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout: destroy the session entirely.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = destroy_session(&session).await {
        tracing::error!("Failed to flush session: {e}");
    }
    Redirect::to("/").into_response()
}
