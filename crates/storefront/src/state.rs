//! Application state shared across UI components.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::notify::{BroadcastNotifier, Notifier};
use crate::services::auth::{CredentialVerifier, MockVerifier};
use crate::session::SessionStore;
use crate::storage::{DurableStorage, FileStorage};

/// Application state shared across all UI components.
///
/// Built once at startup; hydrates both stores from durable storage. Cheaply
/// cloneable via `Arc`, so components hold their own handle instead of
/// reaching for a global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: CartStore,
    session: SessionStore,
    notifier: BroadcastNotifier,
}

impl AppState {
    /// Create the state with file-backed storage and the mock verifier.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    #[must_use]
    pub fn init(config: StorefrontConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let verifier = Arc::new(MockVerifier::new(config.auth));
        Self::with_parts(config, storage, verifier)
    }

    /// Create the state over explicit collaborators.
    ///
    /// Both stores share `storage`; notifications from either store go to the
    /// same [`BroadcastNotifier`].
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        storage: Arc<dyn DurableStorage>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let notifier = BroadcastNotifier::new();
        let sink: Arc<dyn Notifier> = Arc::new(notifier.clone());

        let cart = CartStore::hydrate(Arc::clone(&storage), Arc::clone(&sink));
        let session = SessionStore::hydrate(storage, sink, verifier, config.admin_emails.clone());
        tracing::info!(
            cart_items = cart.item_count(),
            signed_in = session.identity().is_some(),
            "Storefront state ready"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                session,
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the notification fan-out, for UI subscribers.
    #[must_use]
    pub fn notifier(&self) -> &BroadcastNotifier {
        &self.inner.notifier
    }

    /// Flush both stores to durable storage before exit.
    ///
    /// Failures are reported and otherwise ignored.
    pub fn shutdown(&self) {
        if let Err(e) = self.inner.cart.flush() {
            crate::error::report_storage_failure("flush cart", &e);
        }
        self.inner.session.flush_or_report();
        tracing::info!("Storefront state flushed");
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("cart", &self.inner.cart)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use authentic_wear_core::{CartProduct, Money, SessionStatus};
    use secrecy::SecretString;

    use super::*;
    use crate::storage::{MemoryStorage, keys};

    #[tokio::test(start_paused = true)]
    async fn test_stores_share_storage_and_notifier() {
        let storage = MemoryStorage::new();
        let state = AppState::with_parts(
            StorefrontConfig::default(),
            Arc::new(storage.clone()),
            Arc::new(MockVerifier::default()),
        );
        let mut rx = state.notifier().subscribe();

        state.cart().add_to_cart(
            CartProduct::new("p1", "Premium Cotton T-Shirt", Money::from_cents(3999), "t.jpg"),
            1,
            None,
        );
        state
            .session()
            .login("user@x.com", SecretString::from("pw".to_string()))
            .await
            .unwrap();

        assert!(storage.contains(keys::CART));
        assert!(storage.contains(keys::IDENTITY));
        assert_eq!(
            rx.try_recv().unwrap().message,
            "Added Premium Cotton T-Shirt to cart"
        );
        assert_eq!(rx.try_recv().unwrap().message, "Logged in successfully");
    }

    #[test]
    fn test_init_uses_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            storage_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };

        let state = AppState::init(config.clone());
        state.cart().add_to_cart(
            CartProduct::new("p3", "High-Waist Cargo Pants", Money::from_cents(8999), "c.jpg"),
            1,
            Some("S"),
        );
        state.shutdown();
        assert!(dir.path().join("authenticCart.json").exists());

        let restarted = AppState::init(config);
        assert_eq!(restarted.cart().item_count(), 1);
        assert_eq!(restarted.session().status(), SessionStatus::Anonymous);
    }
}
