//! Authentication service.
//!
//! Credential checking is delegated to a [`CredentialVerifier`]. The storefront
//! ships only [`MockVerifier`], which simulates network latency and accepts any
//! password; a real backend plugs in by implementing the trait.

mod error;

pub use error::AuthError;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use authentic_wear_core::{Email, UserId};

use crate::config::AuthConfig;

/// Emails that are issued admin identities unless configured otherwise.
pub const DEFAULT_ADMIN_EMAILS: [&str; 2] = ["admin@authenticwear.com", "owner@authenticwear.com"];

/// Which flow a credential check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthIntent {
    Login,
    Signup,
}

/// Checks credentials and issues user ids.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify `email`/`password` and return the id of the signed-in user.
    ///
    /// `email` is passed through as typed; it may be a plain username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the credentials are
    /// refused, or another `AuthError` when the check cannot be performed.
    async fn verify(
        &self,
        email: &str,
        password: &SecretString,
        intent: AuthIntent,
    ) -> Result<UserId, AuthError>;

    /// End the remote side of a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the sign-out cannot be performed.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Verifier that accepts every credential after a fixed delay.
///
/// Each successful check issues a fresh random user id.
#[derive(Debug, Clone, Copy)]
pub struct MockVerifier {
    login_delay: Duration,
    logout_delay: Duration,
}

impl MockVerifier {
    /// Create a mock verifier with the configured delays.
    #[must_use]
    pub const fn new(config: AuthConfig) -> Self {
        Self {
            login_delay: config.login_delay,
            logout_delay: config.logout_delay,
        }
    }
}

impl Default for MockVerifier {
    fn default() -> Self {
        Self::new(AuthConfig::default())
    }
}

#[async_trait]
impl CredentialVerifier for MockVerifier {
    async fn verify(
        &self,
        email: &str,
        _password: &SecretString,
        intent: AuthIntent,
    ) -> Result<UserId, AuthError> {
        tokio::time::sleep(self.login_delay).await;
        tracing::debug!(email, ?intent, "mock verifier accepted credentials");
        Ok(UserId::new(uuid::Uuid::new_v4().to_string()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        tokio::time::sleep(self.logout_delay).await;
        Ok(())
    }
}

/// The fixed set of emails that receive `is_admin = true` at issuance.
///
/// Matching is exact against the address as typed; no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: Vec<Email>,
}

impl AdminAllowList {
    /// Create an allow-list from a set of emails.
    #[must_use]
    pub const fn new(emails: Vec<Email>) -> Self {
        Self { emails }
    }

    /// Returns `true` if `email` is on the list.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|admin| admin.as_str() == email)
    }
}

impl Default for AdminAllowList {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADMIN_EMAILS
                .iter()
                .filter_map(|email| Email::parse(email).ok())
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let list = AdminAllowList::default();
        assert!(list.contains("admin@authenticwear.com"));
        assert!(list.contains("owner@authenticwear.com"));
        assert!(!list.contains("user@x.com"));
        assert!(!list.contains("ADMIN@authenticwear.com"));
        assert!(!list.contains("admin"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_verifier_waits_then_accepts() {
        let verifier = MockVerifier::default();
        let email = "user@x.com";
        let password = SecretString::from("anything".to_string());

        let start = tokio::time::Instant::now();
        let first = verifier
            .verify(email, &password, AuthIntent::Login)
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));

        let second = verifier
            .verify(email, &SecretString::from(String::new()), AuthIntent::Signup)
            .await
            .unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_sign_out_delay() {
        let verifier = MockVerifier::default();
        let start = tokio::time::Instant::now();
        verifier.sign_out().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
