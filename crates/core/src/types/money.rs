//! Non-negative money amounts using decimal arithmetic.
//!
//! The storefront sells in a single currency, so a `Money` is just a
//! `Decimal` that is known to be `>= 0`. Arithmetic needed by the cart
//! (line totals, sums, percentages) is provided here so that callers never
//! touch floating point.
//!
//! On the wire an amount is a JSON number (`39.99`), as the web client writes
//! it. Decimal strings (`"39.99"`) are accepted when reading.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

/// Errors that can occur when constructing a [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in the store currency (dollars, not cents).
///
/// ## Examples
///
/// ```
/// use authentic_wear_core::Money;
/// use rust_decimal::Decimal;
///
/// let price = Money::new(Decimal::new(3999, 2)).unwrap();
/// assert_eq!(price.to_string(), "$39.99");
/// assert_eq!(price.times(3).to_string(), "$119.97");
///
/// assert!(Money::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money amount.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a money amount from whole cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// This amount multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// This amount scaled by a non-negative rate and rounded to cents.
    ///
    /// Midpoints round away from zero, matching how prices are displayed.
    #[must_use]
    pub fn percent_of(self, rate: Decimal) -> Self {
        let scaled = (self.0 * rate.abs())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self(scaled)
    }

    /// Returns `true` when the amount is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${rounded:.2}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            Money::new(Decimal::new(-5, 1)),
            Err(MoneyError::Negative(Decimal::new(-5, 1)))
        );
    }

    #[test]
    fn test_accepts_zero() {
        assert!(Money::new(Decimal::ZERO).unwrap().is_zero());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Money = [Money::from_cents(3999).times(2), Money::from_cents(5999)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::new(13997, 2));
    }

    #[test]
    fn test_percent_of_rounds_to_cents() {
        // 7% of 39.99 = 2.7993
        let tax = Money::from_cents(3999).percent_of(Decimal::new(7, 2));
        assert_eq!(tax.amount(), Decimal::new(280, 2));
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_value(Money::from_cents(3999)).unwrap();
        assert!((json.as_f64().unwrap() - 39.99).abs() < 1e-9);
        assert_eq!(serde_json::from_value::<Money>(json).unwrap(), Money::from_cents(3999));

        let money: Money = serde_json::from_str("89.99").unwrap();
        assert_eq!(money, Money::from_cents(8999));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Money>("\"-1.00\"").is_err());
        let money: Money = serde_json::from_str("\"59.99\"").unwrap();
        assert_eq!(money, Money::from_cents(5999));
    }
}
