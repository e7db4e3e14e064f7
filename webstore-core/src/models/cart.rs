//! Remote cart contents and quantity handling.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::product::{Product, ProductId};

/// One line of the remote cart: a product plus the quantity in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub product: Product,
    pub amount: u32,
}

/// The GET /cart response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartContents {
    #[serde(default)]
    pub items: Vec<CartEntry>,
}

impl CartContents {
    /// IDs of every product currently in the remote cart.
    pub fn product_ids(&self) -> HashSet<ProductId> {
        self.items.iter().map(|e| e.product.id.clone()).collect()
    }

    /// Order total: sum of price times quantity over all entries.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|e| e.product.price * e.amount as f64)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Clamp a requested quantity to the minimum of 1 before it is sent to the
/// cart service. No maximum is enforced.
pub fn clamp_quantity(requested: i64) -> u32 {
    if requested < 1 {
        1
    } else {
        requested as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("product-{}", id),
            desc: String::new(),
            img: String::new(),
            price,
            available: true,
            kind: "Electronics".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn test_clamp_quantity_minimum_is_one() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-5), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(7), 7);
    }

    #[test]
    fn test_cart_total() {
        let cart = CartContents {
            items: vec![
                CartEntry {
                    id: "e1".to_string(),
                    product: product("p1", 10.0),
                    amount: 2,
                },
                CartEntry {
                    id: "e2".to_string(),
                    product: product("p2", 3.5),
                    amount: 1,
                },
            ],
        };

        assert_eq!(cart.total(), 23.5);
    }

    #[test]
    fn test_cart_product_ids() {
        let cart = CartContents {
            items: vec![CartEntry {
                id: "e1".to_string(),
                product: product("p1", 10.0),
                amount: 2,
            }],
        };

        let ids = cart.product_ids();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&ProductId::from("p1")));
    }

    #[test]
    fn test_cart_contents_parses_service_response() {
        let json = r#"{
            "items": [
                {
                    "_id": "entry1",
                    "product": {"_id": "p1", "name": "Tote", "price": 10.0, "type": "Fashion"},
                    "amount": 3
                }
            ]
        }"#;

        let cart: CartContents = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].amount, 3);
        assert_eq!(cart.total(), 30.0);
    }

    #[test]
    fn test_cart_contents_missing_items_is_empty() {
        let cart: CartContents = serde_json::from_str("{}").unwrap();
        assert!(cart.is_empty());
    }
}
