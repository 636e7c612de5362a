//! Authentication service.
//!
//! Two login paths share one form:
//!
//! - the **admin** path compares against the configuration-supplied
//!   credential (never a literal in view code), and
//! - the **customer** path fetches the account row by email and verifies the
//!   supplied plaintext against the stored Argon2id hash.
//!
//! Registration and login agree on Argon2id end to end: the stored column
//! is always a PHC string and login never compares raw values against it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use capstore_core::{Email, EmailError};

use crate::accounts::{AccountClient, AccountError, AccountRecord, NewAccount};
use crate::config::AdminCredential;

/// Minimum password length for registration.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong password or no such account. Deliberately one variant so the
    /// login page cannot be used to enumerate registered emails.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Account service failure.
    #[error("account service error: {0}")]
    Account(#[from] AccountError),

    /// Password hashing failure.
    #[error("password hashing error")]
    PasswordHash,
}

/// Who a successful login authenticated as.
#[derive(Debug)]
pub enum Authenticated {
    /// The configured admin credential matched.
    Admin,
    /// A customer account matched.
    Customer(AccountRecord),
}

/// Registration input beyond the credentials themselves.
#[derive(Debug, Default, Clone)]
pub struct RegistrationDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Authentication service over the account client.
pub struct AuthService<'a> {
    accounts: &'a AccountClient,
    admin: &'a AdminCredential,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(accounts: &'a AccountClient, admin: &'a AdminCredential) -> Self {
        Self { accounts, admin }
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::WeakPassword` if the password is too short,
    /// `AuthError::DuplicateEmail` if the email is already registered, and
    /// `AuthError::Account` for other service failures.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        details: RegistrationDetails,
    ) -> Result<AccountRecord, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let record = self
            .accounts
            .register(&NewAccount {
                email,
                password_hash,
                first_name: details.first_name,
                last_name: details.last_name,
                phone: details.phone,
            })
            .await
            .map_err(|e| match e {
                AccountError::DuplicateEmail => AuthError::DuplicateEmail,
                other => AuthError::Account(other),
            })?;

        Ok(record)
    }

    /// Login with email and password.
    ///
    /// The admin credential is checked first; it never touches the account
    /// service. Customer login fetches the row by email only and verifies
    /// the hash locally.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password pair is
    /// wrong, for both unknown emails and wrong passwords.
    pub async fn login(&self, email: &str, password: &str) -> Result<Authenticated, AuthError> {
        if self.admin.matches(email, password) {
            return Ok(Authenticated::Admin);
        }

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let record = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &record.password_hash)?;
        Ok(Authenticated::Customer(record))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored Argon2id PHC string.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or on an
/// unparseable stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_never_verifies() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_stored_hash_is_invalid_credentials_not_a_panic() {
        // A raw (unhashed) stored value must never verify, even when it
        // equals the submitted password.
        assert!(matches!(
            verify_password("plaintext", "plaintext"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same input").unwrap();
        let b = hash_password("same input").unwrap();
        assert_ne!(a, b);
    }
}
