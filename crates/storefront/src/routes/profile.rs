//! Customer profile route handlers.
//!
//! The profile is a single record per installation: display name, shipping
//! address, and an optional photo stored inline as a data URI.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::session::RequireCustomer;
use crate::state::AppState;
use crate::upload;

use super::MessageQuery;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/edit.html")]
pub struct ProfileTemplate {
    pub name: String,
    pub address: String,
    pub photo: Option<String>,
    pub customer_email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Display the profile form.
#[instrument(skip(state, customer))]
pub async fn edit(
    State(state): State<AppState>,
    RequireCustomer(customer): RequireCustomer,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let profile = state.profile().load();

    ProfileTemplate {
        name: profile.name,
        address: profile.address,
        photo: profile.photo,
        customer_email: customer.email.into_inner(),
        error: query.error,
        notice: query.notice,
    }
}

/// Save the profile form.
///
/// Multipart because of the photo field; an empty photo field keeps the
/// previously saved photo.
#[instrument(skip(state, _customer, multipart))]
pub async fn save(
    State(state): State<AppState>,
    _customer: RequireCustomer,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut profile = state.profile().load();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid form data: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        match name.as_str() {
            "name" => {
                profile.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid name field: {e}")))?;
            }
            "address" => {
                profile.address = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid address field: {e}")))?;
            }
            "photo" => {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid photo upload: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                let data_uri = upload::to_data_uri(&content_type, &bytes)
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                profile.photo = Some(data_uri);
            }
            _ => {}
        }
    }

    state.profile().save(profile)?;

    let url = format!("/profile?notice={}", urlencoding::encode("Profile saved"));
    Ok(Redirect::to(&url).into_response())
}
