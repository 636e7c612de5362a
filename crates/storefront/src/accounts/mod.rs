//! Client for the hosted account table API.
//!
//! Customer accounts live in an external table service (PostgREST-style
//! surface, as offered by Supabase): registration is a row insert, login is
//! an equality-filtered select on email. The client performs no retries and
//! sets no custom timeouts; a transport failure surfaces straight to the
//! caller (and from there to the user).
//!
//! Passwords cross this boundary only as Argon2id hashes. Verification of a
//! supplied plaintext against the stored hash happens in
//! [`crate::services::auth`], never as a raw equality filter on the
//! password column.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use capstore_core::Email;

use crate::config::AccountServiceConfig;

/// Table path under the service base URL.
const ACCOUNTS_TABLE: &str = "rest/v1/accounts";

/// Postgres unique-violation SQLSTATE, surfaced by PostgREST error bodies.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors from the account service.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The request never completed (DNS, connect, TLS, body read).
    #[error("account service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    DuplicateEmail,
    /// Any other service-reported failure, with the service's reason.
    #[error("account service error ({status}): {message}")]
    Service { status: u16, message: String },
}

/// A stored account row.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Insert payload for registration. The password must already be hashed.
#[derive(Debug, Serialize)]
pub struct NewAccount {
    pub email: Email,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Error body shape returned by the table service.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the account table.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl AccountClient {
    /// Create a client from the service configuration.
    #[must_use]
    pub fn new(config: &AccountServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{ACCOUNTS_TABLE}", self.base_url)
    }

    /// Insert a new account row.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateEmail`] when the service reports a
    /// unique violation on the email column, [`AccountError::Service`] for
    /// any other service failure, and [`AccountError::Transport`] when the
    /// request never completed.
    pub async fn register(&self, account: &NewAccount) -> Result<AccountRecord, AccountError> {
        let response = self
            .http
            .post(self.table_url())
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "return=representation")
            .json(account)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        // PostgREST returns the inserted rows as an array.
        let mut rows: Vec<AccountRecord> = response.json().await?;
        rows.pop().ok_or_else(|| AccountError::Service {
            status: status.as_u16(),
            message: "insert returned no rows".to_owned(),
        })
    }

    /// Look up an account by email (equality select).
    ///
    /// Returns `Ok(None)` when no row matches.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Service`] or [`AccountError::Transport`] as
    /// for [`Self::register`].
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<AccountRecord>, AccountError> {
        let response = self
            .http
            .get(self.table_url())
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .query(&[
                ("select", "*"),
                ("email", &format!("eq.{}", email.as_str())),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let mut rows: Vec<AccountRecord> = response.json().await?;
        Ok(rows.pop())
    }
}

/// Map a non-success service response to an [`AccountError`].
///
/// Duplicate emails must be distinguishable from generic failures: the
/// service signals them either with HTTP 409 or a `23505` SQLSTATE in the
/// error body.
fn classify_failure(status: StatusCode, body: &str) -> AccountError {
    let parsed: Option<ServiceErrorBody> = serde_json::from_str(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code.as_deref());

    if status == StatusCode::CONFLICT || code == Some(UNIQUE_VIOLATION) {
        return AccountError::DuplicateEmail;
    }

    let message = parsed
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    AccountError::Service {
        status: status.as_u16(),
        message,
    }
}
