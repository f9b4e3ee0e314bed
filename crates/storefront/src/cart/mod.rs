//! Cart store.
//!
//! Holds the ordered list of cart lines for the current client, mirrors it to
//! durable storage after every mutation, and reports each action through the
//! [`Notifier`].
//!
//! # Line identity
//!
//! `add_to_cart` merges lines by `(id, size)`, but `remove_from_cart` and
//! `update_quantity` address lines by product id only:
//!
//! - removing `"p1"` drops every size of `"p1"`
//! - updating `"p1"` sets the quantity of every size of `"p1"`
//!
//! # Failure handling
//!
//! Storage errors never reach the caller. A snapshot that cannot be read
//! hydrates as an empty cart; a snapshot that cannot be written is logged and
//! the in-memory cart stays authoritative.

mod summary;

pub use summary::{
    FLAT_SHIPPING_CENTS, FREE_SHIPPING_THRESHOLD_CENTS, OrderSummary, TAX_RATE_PERCENT,
};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::instrument;

use authentic_wear_core::{CartLine, CartProduct, Money};

use crate::error::{add_breadcrumb, report_storage_failure};
use crate::notify::{Notification, Notifier};
use crate::storage::{DurableStorage, StorageError, keys};

/// Total number of items across `lines`.
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// Sum of price times quantity across `lines`.
#[must_use]
pub fn total(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

/// The authoritative cart for the current client.
///
/// All methods take `&self`; the line list sits behind a watch channel so UI
/// code can [`subscribe`](Self::subscribe) and re-render on every change.
pub struct CartStore {
    lines: watch::Sender<Vec<CartLine>>,
    storage: Arc<dyn DurableStorage>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &*self.lines.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Build the store and load the persisted cart.
    ///
    /// A missing snapshot yields an empty cart. An unreadable or malformed
    /// snapshot is reported and also yields an empty cart. Persisted lines
    /// with a zero quantity are dropped.
    #[must_use]
    pub fn hydrate(storage: Arc<dyn DurableStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let lines = match storage.load_json::<Vec<CartLine>>(keys::CART) {
            Ok(Some(mut lines)) => {
                let before = lines.len();
                lines.retain(|line| line.quantity >= 1);
                if lines.len() != before {
                    tracing::warn!(
                        dropped = before - lines.len(),
                        "Dropped persisted cart lines with zero quantity"
                    );
                }
                lines
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                report_storage_failure("load cart", &e);
                Vec::new()
            }
        };
        tracing::debug!(lines = lines.len(), "Cart hydrated");

        let (lines, _) = watch::channel(lines);
        Self {
            lines,
            storage,
            notifier,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of `product` to the cart.
    ///
    /// When `size` is given, an existing line with the same id and size is
    /// incremented. When `size` is omitted, the first line with the same id is
    /// incremented whatever its size. Otherwise a new line is appended.
    /// An empty `size` counts as omitted.
    ///
    /// A zero quantity is ignored. Quantities saturate at `u32::MAX`.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: CartProduct, quantity: u32, size: Option<&str>) {
        if quantity == 0 {
            tracing::debug!("Ignoring add with zero quantity");
            return;
        }
        let size = size.filter(|size| !size.is_empty());

        let mut message = String::new();
        self.lines.send_modify(|lines| {
            let existing = lines.iter_mut().find(|line| {
                line.id == product.id && size.is_none_or(|size| line.size.as_deref() == Some(size))
            });
            match existing {
                Some(line) => {
                    line.quantity = line.quantity.saturating_add(quantity);
                    message = format!("Updated quantity for {}", product.name);
                }
                None => {
                    message = format!("Added {} to cart", product.name);
                    lines.push(CartLine::from_product(product, quantity, size.map(str::to_owned)));
                }
            }
        });

        self.persist();
        add_breadcrumb("cart", &message, None);
        self.notifier.notify(Notification::success(message));
    }

    /// Remove every line whose product id is `id`, whatever its size.
    ///
    /// The confirmation names the first removed line. Nothing is announced
    /// when no line matches.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, id: &str) {
        let mut removed = None;
        self.lines.send_if_modified(|lines| {
            removed = lines
                .iter()
                .find(|line| line.id.as_str() == id)
                .map(|line| line.name.clone());
            lines.retain(|line| line.id.as_str() != id);
            removed.is_some()
        });

        self.persist();
        if let Some(name) = removed {
            let message = format!("Removed {name} from cart");
            add_breadcrumb("cart", &message, Some(&[("product_id", id)]));
            self.notifier.notify(Notification::success(message));
        }
    }

    /// Set the quantity of every line whose product id is `id`, whatever its
    /// size. The confirmation names the first matching line.
    ///
    /// Quantities below 1 (or above `u32::MAX`) are ignored entirely: the cart
    /// is not touched, persisted or announced.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: &str, quantity: i64) {
        let Some(quantity) = u32::try_from(quantity).ok().filter(|q| *q >= 1) else {
            tracing::debug!("Ignoring quantity update outside 1..=u32::MAX");
            return;
        };

        let mut updated = None;
        self.lines.send_if_modified(|lines| {
            let mut changed = false;
            for line in lines.iter_mut().filter(|line| line.id.as_str() == id) {
                if updated.is_none() {
                    updated = Some(line.name.clone());
                }
                changed |= line.quantity != quantity;
                line.quantity = quantity;
            }
            changed
        });

        self.persist();
        if let Some(name) = updated {
            self.notifier
                .notify(Notification::success(format!("Updated quantity for {name}")));
        }
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        self.lines.send_modify(Vec::clear);
        self.persist();
        add_breadcrumb("cart", "Cart cleared", None);
        self.notifier.notify(Notification::success("Cart cleared"));
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Snapshot of the lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.borrow().clone()
    }

    /// Total number of items (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        item_count(&self.lines.borrow())
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn total(&self) -> Money {
        total(&self.lines.borrow())
    }

    /// Shipping, tax and grand total for the current cart.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        let lines = self.lines.borrow();
        OrderSummary::new(item_count(&lines), total(&lines))
    }

    /// Returns `true` when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Watch the line list. The receiver sees the current value immediately
    /// and is marked changed after every mutation that alters it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.lines.subscribe()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current snapshot to storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn flush(&self) -> Result<(), StorageError> {
        let lines = self.lines.borrow();
        self.storage.save_json(keys::CART, lines.as_slice())
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            report_storage_failure("save cart", &e);
        }
    }
}
