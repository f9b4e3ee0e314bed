//! Order summary shown next to the cart: shipping, tax and grand total.

use rust_decimal::Decimal;
use serde::Serialize;

use authentic_wear_core::Money;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: u32 = 10_000;

/// Shipping charged below the free-shipping threshold.
pub const FLAT_SHIPPING_CENTS: u32 = 500;

/// Sales tax rate, in percent of the subtotal.
pub const TAX_RATE_PERCENT: u32 = 7;

/// Price breakdown derived from the cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl OrderSummary {
    /// Compute the summary for a cart with `item_count` items worth `subtotal`.
    #[must_use]
    pub fn new(item_count: u64, subtotal: Money) -> Self {
        let shipping = if subtotal >= Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS) {
            Money::ZERO
        } else {
            Money::from_cents(FLAT_SHIPPING_CENTS)
        };
        let tax = subtotal.percent_of(Decimal::new(i64::from(TAX_RATE_PERCENT), 2));

        Self {
            item_count,
            subtotal,
            shipping,
            tax,
            grand_total: subtotal + shipping + tax,
        }
    }

    /// Returns `true` when the order qualifies for free shipping.
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}
