//! Unified error handling with Sentry integration.
//!
//! Each concern has its own error enum (`StorageError`, `AuthError`,
//! `ConfigError`); `AppError` wraps them for callers that drive several
//! concerns at once, such as [`crate::state::AppState::init`].
//!
//! The helpers below report to Sentry. When Sentry has not been initialized
//! they are no-ops, so stores can call them unconditionally.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront state layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Log a storage failure that the caller is about to swallow and send it to
/// Sentry.
pub fn report_storage_failure(operation: &str, err: &StorageError) {
    let event_id = sentry::capture_error(err);
    tracing::warn!(
        operation,
        error = %err,
        sentry_event_id = %event_id,
        "Storage failure, continuing with in-memory state"
    );
}

/// Set the Sentry user context after a successful login or signup.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a user action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of cart and
/// session actions leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(StorageError::Unavailable("disabled".to_string()));
        assert_eq!(err.to_string(), "Storage error: storage unavailable: disabled");

        let err = AppError::from(ConfigError::MissingEnvVar("X".to_string()));
        assert_eq!(
            err.to_string(),
            "Config error: Missing environment variable: X"
        );
    }

    #[test]
    fn test_helpers_without_sentry_client() {
        report_storage_failure("test", &StorageError::Unavailable("off".to_string()));
        add_breadcrumb("cart", "Added item", Some(&[("product_id", "p1")]));
        set_sentry_user(&"1", Some("user@x.com"));
        clear_sentry_user();
    }
}
