//! Cart line records.
//!
//! These are the records persisted in the cart snapshot. Field names are
//! camelCase on the wire so the snapshot stays readable by the web client.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::money::Money;

/// The product fields copied into a cart line when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Image URL shown next to the line.
    pub image: String,
}

impl CartProduct {
    /// Create a product reference for the cart.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// One entry in the cart: a product, an optional size, and a quantity.
///
/// Two lines are the same entry when both `id` and `size` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    /// Always at least 1 for lines created by the cart store.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    /// Build a new line from a product.
    #[must_use]
    pub fn from_product(product: CartProduct, quantity: u32, size: Option<String>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity,
            size,
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tee() -> CartProduct {
        CartProduct::new(
            "p1",
            "Premium Cotton T-Shirt",
            Money::from_cents(3999),
            "https://images.example.com/tee.jpg",
        )
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::from_product(tee(), 3, None);
        assert_eq!(line.line_total(), Money::from_cents(11997));
    }

    #[test]
    fn test_absent_size_is_omitted_from_json() {
        let line = CartLine::from_product(tee(), 1, None);
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("size").is_none());
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["id"], "p1");
        assert!(json["price"].is_number());
    }

    #[test]
    fn test_parses_web_client_snapshot() {
        let json = r#"{"id":"p1","name":"Premium Cotton T-Shirt","price":39.99,"image":"t.jpg","quantity":2,"size":"M"}"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.price, Money::from_cents(3999));
        assert_eq!(line.size.as_deref(), Some("M"));
    }

    #[test]
    fn test_parses_snapshot_without_size() {
        let json = r#"{"id":"p2","name":"Vintage Logo Hoodie","price":"59.99","image":"h.jpg","quantity":2}"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.size, None);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Money::from_cents(5999));
    }
}
