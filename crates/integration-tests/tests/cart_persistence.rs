//! Cart behaviour across restarts on file-backed storage.
//!
//! Each test boots the storefront state over a temporary directory, mutates
//! the cart, then boots again over the same directory to simulate the client
//! restarting.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use authentic_wear_core::{CartLine, Money};
use authentic_wear_integration_tests::catalog::{cargo_pants, hoodie, tee};
use authentic_wear_integration_tests::{boot, file_storage};
use authentic_wear_storefront::storage::{DurableStorage, keys};

// =============================================================================
// Restart
// =============================================================================

#[test]
fn test_restart_reproduces_lines_and_totals() {
    let dir = tempfile::tempdir().unwrap();

    let state = boot(dir.path());
    state.cart().add_to_cart(tee(), 2, None);
    state.cart().add_to_cart(hoodie(), 1, Some("L"));
    state.cart().add_to_cart(hoodie(), 1, Some("XL"));
    let lines = state.cart().lines();
    let total = state.cart().total();
    drop(state);

    let restarted = boot(dir.path());
    assert_eq!(restarted.cart().lines(), lines);
    assert_eq!(restarted.cart().item_count(), 4);
    assert_eq!(restarted.cart().total(), total);
    assert_eq!(total, Money::from_cents(3999 * 2 + 5999 * 2));
}

#[test]
fn test_clear_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let state = boot(dir.path());
    state.cart().add_to_cart(cargo_pants(), 1, Some("M"));
    state.cart().clear_cart();

    let restarted = boot(dir.path());
    assert!(restarted.cart().is_empty());
    assert_eq!(restarted.cart().item_count(), 0);
}

#[test]
fn test_snapshot_is_plain_json_array() {
    let dir = tempfile::tempdir().unwrap();

    let state = boot(dir.path());
    state.cart().add_to_cart(tee(), 1, Some("M"));

    let raw = file_storage(dir.path()).get_item(keys::CART).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "p1");
    assert_eq!(entries[0]["size"], "M");
    assert_eq!(entries[0]["quantity"], 1);
    assert!(entries[0]["price"].is_number());
}

#[test]
fn test_corrupted_snapshot_boots_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    file_storage(dir.path())
        .set_item(keys::CART, "definitely not json")
        .unwrap();

    let state = boot(dir.path());
    assert!(state.cart().is_empty());

    state.cart().add_to_cart(tee(), 1, None);
    let raw = file_storage(dir.path()).get_item(keys::CART).unwrap().unwrap();
    let lines: Vec<CartLine> = serde_json::from_str(&raw).unwrap();
    assert_eq!(lines.len(), 1);
}

// =============================================================================
// Documented behaviour
// =============================================================================

#[test]
fn test_quantities_add_up_for_same_product() {
    let dir = tempfile::tempdir().unwrap();
    let state = boot(dir.path());

    state.cart().add_to_cart(tee(), 2, None);
    state.cart().add_to_cart(tee(), 3, None);

    let lines = state.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
}

#[test]
fn test_remove_drops_all_sizes_of_a_product() {
    let dir = tempfile::tempdir().unwrap();
    let state = boot(dir.path());

    state.cart().add_to_cart(tee(), 1, Some("S"));
    state.cart().add_to_cart(tee(), 1, Some("M"));
    state.cart().add_to_cart(cargo_pants(), 1, None);
    state.cart().remove_from_cart("p1");

    let restarted = boot(dir.path());
    let lines = restarted.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, "p3");
}

#[test]
fn test_update_quantity_applies_to_every_size_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state = boot(dir.path());
    state.cart().add_to_cart(tee(), 1, Some("S"));
    state.cart().add_to_cart(tee(), 1, Some("XL"));
    state.cart().update_quantity("p1", 4);

    let lines = boot(dir.path()).cart().lines();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.quantity == 4));
}

#[test]
fn test_invalid_quantity_updates_leave_snapshot_alone() {
    let dir = tempfile::tempdir().unwrap();
    let state = boot(dir.path());
    state.cart().add_to_cart(hoodie(), 2, None);
    let before = file_storage(dir.path()).get_item(keys::CART).unwrap();

    state.cart().update_quantity("p2", 0);
    state.cart().update_quantity("p2", -1);

    assert_eq!(file_storage(dir.path()).get_item(keys::CART).unwrap(), before);
    assert_eq!(state.cart().item_count(), 2);
}

#[test]
fn test_order_summary_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state = boot(dir.path());
    state.cart().add_to_cart(cargo_pants(), 1, None);
    state.cart().add_to_cart(tee(), 1, None);

    let summary = boot(dir.path()).cart().summary();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.subtotal, Money::from_cents(12_998));
    assert!(summary.ships_free());
    // 7% of 129.98 = 9.0986
    assert_eq!(summary.tax, Money::from_cents(910));
    assert_eq!(summary.grand_total.to_string(), "$139.08");
}
