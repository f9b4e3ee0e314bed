//! Integration tests for the Authentic Wear storefront state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p authentic-wear-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - cart behaviour across restarts on file-backed storage
//! - `session_lifecycle` - login/logout flows, overlapping logins, stale admin flag
//!
//! This library holds the fixtures those tests share.

use std::path::Path;
use std::sync::Arc;

use authentic_wear_core::{CartProduct, Money};
use authentic_wear_storefront::config::{AuthConfig, StorefrontConfig};
use authentic_wear_storefront::services::auth::AdminAllowList;
use authentic_wear_storefront::state::AppState;
use authentic_wear_storefront::storage::FileStorage;

/// The three catalog items most tests put in the cart.
pub mod catalog {
    use super::{CartProduct, Money};

    /// p1, $39.99.
    #[must_use]
    pub fn tee() -> CartProduct {
        CartProduct::new(
            "p1",
            "Premium Cotton T-Shirt",
            Money::from_cents(3999),
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab",
        )
    }

    /// p2, $59.99.
    #[must_use]
    pub fn hoodie() -> CartProduct {
        CartProduct::new(
            "p2",
            "Vintage Logo Hoodie",
            Money::from_cents(5999),
            "https://images.unsplash.com/photo-1556821840-3a63f95609a7",
        )
    }

    /// p3, $89.99.
    #[must_use]
    pub fn cargo_pants() -> CartProduct {
        CartProduct::new(
            "p3",
            "High-Waist Cargo Pants",
            Money::from_cents(8999),
            "https://images.unsplash.com/photo-1594633312681-425c7b97ccd1",
        )
    }
}

/// Configuration rooted at `dir` with the default delays and allow-list.
#[must_use]
pub fn config_in(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        storage_dir: dir.to_path_buf(),
        auth: AuthConfig::default(),
        admin_emails: AdminAllowList::default(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Start (or restart) the storefront state over the files in `dir`.
#[must_use]
pub fn boot(dir: &Path) -> AppState {
    AppState::init(config_in(dir))
}

/// File storage over `dir`, for poking at snapshots directly.
#[must_use]
pub fn file_storage(dir: &Path) -> Arc<FileStorage> {
    Arc::new(FileStorage::new(dir))
}
