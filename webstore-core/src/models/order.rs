//! Order placement payload.

use serde::{Deserialize, Serialize};

use super::cart::{CartContents, CartEntry};

/// Status sent with a freshly placed order. The order service tracks later
/// transitions; the client only ever submits this initial value.
pub const ORDER_STATUS_PLACED: &str = "placed";

/// The POST /order body: the cart entries being purchased, the computed
/// total, and the initial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<CartEntry>,
    pub amount: f64,
    pub status: String,
}

impl OrderRequest {
    /// Build an order from the remote cart, computing the total client-side.
    pub fn from_cart(cart: CartContents) -> Self {
        let amount = cart.total();
        Self {
            items: cart.items,
            amount,
            status: ORDER_STATUS_PLACED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductId};

    #[test]
    fn test_order_from_cart() {
        let cart = CartContents {
            items: vec![CartEntry {
                id: "e1".to_string(),
                product: Product {
                    id: ProductId::from("p1"),
                    name: "Tote".to_string(),
                    desc: String::new(),
                    img: String::new(),
                    price: 12.0,
                    available: true,
                    kind: "Fashion".to_string(),
                    stock: 4,
                },
                amount: 2,
            }],
        };

        let order = OrderRequest::from_cart(cart);
        assert_eq!(order.amount, 24.0);
        assert_eq!(order.status, ORDER_STATUS_PLACED);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_order_serializes_expected_shape() {
        let order = OrderRequest {
            items: Vec::new(),
            amount: 0.0,
            status: ORDER_STATUS_PLACED.to_string(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert!(json["items"].is_array());
        assert_eq!(json["amount"], 0.0);
        assert_eq!(json["status"], "placed");
    }
}
