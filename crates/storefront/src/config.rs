//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ACCOUNTS_API_URL` - Base URL of the hosted account table API
//! - `ACCOUNTS_API_KEY` - API key for the account table API
//! - `STORE_ADMIN_EMAIL` - Admin login identifier
//! - `STORE_ADMIN_PASSWORD` - Admin login password (min 12 chars, no placeholders)
//!
//! ## Optional
//! - `STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_PORT` - Listen port (default: 3000)
//! - `STORE_DATA_DIR` - Directory for the JSON store files (default: ./data)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "secret",
    "admin",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the catalog/cart/profile JSON files.
    pub data_dir: PathBuf,
    /// Hosted account table API configuration.
    pub accounts: AccountServiceConfig,
    /// Admin credential (the only privileged login path).
    pub admin: AdminCredential,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag.
    pub sentry_environment: Option<String>,
}

/// Hosted account table API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AccountServiceConfig {
    /// Base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Service API key, sent on every request.
    pub api_key: SecretString,
}

impl std::fmt::Debug for AccountServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Configuration-supplied admin credential.
///
/// The only privileged login path; no credential literal exists anywhere in
/// code. Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredential {
    /// Admin login identifier (matched against the login form's email field).
    pub email: String,
    /// Admin password.
    pub password: SecretString,
}

impl AdminCredential {
    /// Whether the given login form values match this credential.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin password fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("STORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("STORE_DATA_DIR", "./data"));

        let accounts = AccountServiceConfig {
            base_url: get_required_env("ACCOUNTS_API_URL")?,
            api_key: get_required_secret("ACCOUNTS_API_KEY")?,
        };

        let admin_password = get_required_secret("STORE_ADMIN_PASSWORD")?;
        validate_admin_password(&admin_password, "STORE_ADMIN_PASSWORD")?;
        let admin = AdminCredential {
            email: get_required_env("STORE_ADMIN_EMAIL")?,
            password: admin_password,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            accounts,
            admin,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate the admin password: minimum length and no placeholder patterns.
fn validate_admin_password(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_PASSWORD_LENGTH,
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_admin_password_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_admin_password(&secret, "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_admin_password_placeholder() {
        let secret = SecretString::from("changeme-changeme");
        let err = validate_admin_password(&secret, "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_admin_password_valid() {
        let secret = SecretString::from("kY9!mN2@xQ7&rT0*");
        assert!(validate_admin_password(&secret, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_admin_credential_matches() {
        let cred = AdminCredential {
            email: "ops@capstore.test".to_string(),
            password: SecretString::from("kY9!mN2@xQ7&rT0*"),
        };
        assert!(cred.matches("ops@capstore.test", "kY9!mN2@xQ7&rT0*"));
        assert!(!cred.matches("ops@capstore.test", "wrong"));
        assert!(!cred.matches("other@capstore.test", "kY9!mN2@xQ7&rT0*"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = AdminCredential {
            email: "ops@capstore.test".to_string(),
            password: SecretString::from("super-secret-value-1"),
        };
        let debug_output = format!("{cred:?}");
        assert!(debug_output.contains("ops@capstore.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-value-1"));
    }
}
