//! Session store.
//!
//! Tracks who is signed in on this client and mirrors the identity to durable
//! storage. Credentials are checked by a [`CredentialVerifier`]; the admin
//! flag is decided here, from the [`AdminAllowList`], when an identity is
//! issued.
//!
//! # States
//!
//! `Anonymous -> Authenticating -> Authenticated -> Authenticating -> Anonymous`
//!
//! Calls are not serialized. Two overlapping logins both write storage when
//! they finish, and the one that finishes last wins.

mod state;

pub use state::SessionState;

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use authentic_wear_core::{Identity, SessionStatus};

use crate::error::{clear_sentry_user, report_storage_failure, set_sentry_user};
use crate::notify::{Notification, Notifier};
use crate::services::auth::{AdminAllowList, AuthError, AuthIntent, CredentialVerifier};
use crate::storage::{DurableStorage, StorageError, keys};

use state::InFlight;

/// The authentication state of the current client.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn DurableStorage>,
    notifier: Arc<dyn Notifier>,
    verifier: Arc<dyn CredentialVerifier>,
    admins: AdminAllowList,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .field("admins", &self.admins)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build the store and restore any persisted identity.
    ///
    /// The restored identity keeps the `is_admin` value it was issued with;
    /// the allow-list is not consulted. Unreadable entries leave the session
    /// anonymous.
    #[must_use]
    pub fn hydrate(
        storage: Arc<dyn DurableStorage>,
        notifier: Arc<dyn Notifier>,
        verifier: Arc<dyn CredentialVerifier>,
        admins: AdminAllowList,
    ) -> Self {
        let identity = match storage.load_json::<Option<Identity>>(keys::IDENTITY) {
            Ok(identity) => identity.flatten(),
            Err(e) => {
                report_storage_failure("load identity", &e);
                None
            }
        };
        tracing::debug!(signed_in = identity.is_some(), "Session hydrated");

        let (state, _) = watch::channel(SessionState::with_identity(identity));
        Self {
            state,
            storage,
            notifier,
            verifier,
            admins,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Sign in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the verifier refuses the credentials or the
    /// identity cannot be persisted. A failure notification has already been
    /// sent when this returns `Err`.
    ///
    /// `email` is not validated; any string identifies the user.
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Identity, AuthError> {
        self.authenticate(email, password, AuthIntent::Login).await
    }

    /// Create an account and sign in.
    ///
    /// Same contract as [`login`](Self::login). The password is handed to the
    /// verifier untouched; strength rules are a UI concern.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn signup(&self, email: &str, password: SecretString) -> Result<Identity, AuthError> {
        self.authenticate(email, password, AuthIntent::Signup).await
    }

    /// Sign out, forgetting the identity in memory and in storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the verifier fails or the stored identity cannot
    /// be removed. A failure notification has already been sent.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _in_flight = InFlight::begin(&self.state);

        match self.end_session().await {
            Ok(()) => {
                clear_sentry_user();
                self.notifier
                    .notify(Notification::success("Logged out successfully"));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Logout failed");
                self.notifier
                    .notify(Notification::error("Failed to logout. Please try again."));
                Err(e)
            }
        }
    }

    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        email: &str,
        password: SecretString,
        intent: AuthIntent,
    ) -> Result<Identity, AuthError> {
        let _in_flight = InFlight::begin(&self.state);

        let (success, failure) = match intent {
            AuthIntent::Login => (
                "Logged in successfully",
                "Failed to login. Please check your credentials.",
            ),
            AuthIntent::Signup => (
                "Account created successfully",
                "Failed to create account. Please try again.",
            ),
        };

        match self.issue_identity(email, &password, intent).await {
            Ok(identity) => {
                set_sentry_user(&identity.id, Some(identity.email.as_str()));
                tracing::info!(user_id = %identity.id, is_admin = identity.is_admin, "Signed in");
                self.notifier.notify(Notification::success(success));
                Ok(identity)
            }
            Err(e) => {
                tracing::error!(error = %e, "Authentication failed");
                self.notifier.notify(Notification::error(failure));
                Err(e)
            }
        }
    }

    async fn issue_identity(
        &self,
        email: &str,
        password: &SecretString,
        intent: AuthIntent,
    ) -> Result<Identity, AuthError> {
        let id = self.verifier.verify(email, password, intent).await?;

        let is_admin = self.admins.contains(email);
        let identity = Identity::new(id, email, is_admin);

        self.storage.save_json(keys::IDENTITY, &identity)?;
        self.state
            .send_modify(|s| s.set_identity(Some(identity.clone())));
        Ok(identity)
    }

    async fn end_session(&self) -> Result<(), AuthError> {
        self.verifier.sign_out().await?;
        self.storage.remove_item(keys::IDENTITY)?;
        self.state.send_modify(|s| s.set_identity(None));
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    /// `true` while an auth call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// `true` when the signed-in identity was issued as an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state
            .borrow()
            .identity()
            .is_some_and(|identity| identity.is_admin)
    }

    /// Watch the session state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Rewrite the stored identity from memory, or remove it when anonymous.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage cannot be written.
    pub fn flush(&self) -> Result<(), StorageError> {
        let state = self.state.borrow();
        match state.identity() {
            Some(identity) => self.storage.save_json(keys::IDENTITY, identity),
            None => self.storage.remove_item(keys::IDENTITY),
        }
    }

    /// Like [`flush`](Self::flush), but logs instead of returning the error.
    pub fn flush_or_report(&self) {
        if let Err(e) = self.flush() {
            report_storage_failure("flush identity", &e);
        }
    }
}
