//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_STORAGE_DIR` - Directory for persisted snapshots (default: `.authentic-wear`)
//! - `STOREFRONT_LOGIN_DELAY_MS` - Simulated login/signup latency (default: 1000)
//! - `STOREFRONT_LOGOUT_DELAY_MS` - Simulated logout latency (default: 500)
//! - `STOREFRONT_ADMIN_EMAILS` - Comma-separated admin allow-list
//!   (default: `admin@authenticwear.com,owner@authenticwear.com`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use authentic_wear_core::Email;

use crate::services::auth::AdminAllowList;

const DEFAULT_STORAGE_DIR: &str = ".authentic-wear";
const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
const DEFAULT_LOGOUT_DELAY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront state configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory used by the file-backed durable storage
    pub storage_dir: PathBuf,
    /// Simulated auth service latency
    pub auth: AuthConfig,
    /// Emails that are issued admin identities
    pub admin_emails: AdminAllowList,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Simulated latency of the mock auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthConfig {
    /// Delay before a login or signup resolves
    pub login_delay: Duration,
    /// Delay before a logout resolves
    pub logout_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            logout_delay: Duration::from_millis(DEFAULT_LOGOUT_DELAY_MS),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            auth: AuthConfig::default(),
            admin_emails: AdminAllowList::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a delay is not a whole number of
    /// milliseconds or an allow-list entry is not a valid email.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));
        let auth = AuthConfig {
            login_delay: get_millis("STOREFRONT_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?,
            logout_delay: get_millis("STOREFRONT_LOGOUT_DELAY_MS", DEFAULT_LOGOUT_DELAY_MS)?,
        };
        let admin_emails = match get_optional_env("STOREFRONT_ADMIN_EMAILS") {
            Some(raw) => parse_admin_emails(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_ADMIN_EMAILS".to_string(), e))?,
            None => AdminAllowList::default(),
        };

        Ok(Self {
            storage_dir,
            auth,
            admin_emails,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a millisecond duration from the environment.
fn get_millis(key: &str, default: u64) -> Result<Duration, ConfigError> {
    get_optional_env(key).map_or(Ok(Duration::from_millis(default)), |raw| {
        parse_millis(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
    })
}

fn parse_millis(raw: &str) -> Result<Duration, String> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| e.to_string())
}

/// Parse a comma-separated list of admin emails. Blank entries are skipped.
fn parse_admin_emails(raw: &str) -> Result<AdminAllowList, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| Email::parse(entry).map_err(|e| format!("{entry:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()
        .map(AdminAllowList::new)
}
