//! Order placement.

use clap::{Args, Subcommand};

use webstore_core::{ApiGateway, AuthSession, MembershipTracker, OrderRequest};

use super::session_expired;
use crate::config::Config;

/// Order commands
#[derive(Args)]
pub struct OrderCommand {
    #[command(subcommand)]
    pub command: OrderSubcommand,
}

#[derive(Subcommand)]
pub enum OrderSubcommand {
    /// Place an order for everything in the cart
    Place,
}

impl OrderCommand {
    pub async fn run(
        &self,
        config: &Config,
        gateway: &ApiGateway,
        session: &AuthSession,
        cart_tracker: &MembershipTracker,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            OrderSubcommand::Place => {
                let cart = gateway.cart(session).await.map_err(|e| {
                    if e.is_session_expired() {
                        session_expired(config)
                    } else {
                        e.into()
                    }
                })?;

                if cart.is_empty() {
                    println!("Cart is empty. Nothing to order.");
                    return Ok(());
                }

                let order = OrderRequest::from_cart(cart);
                let item_count = order.items.len();
                let amount = order.amount;

                gateway.place_order(session, &order).await.map_err(|e| {
                    if e.is_session_expired() {
                        session_expired(config)
                    } else {
                        e.into()
                    }
                })?;

                // The service consumed the cart; drop the local record too.
                cart_tracker.clear()?;

                println!("Order placed: {} items, total ${:.2}", item_count, amount);
                Ok(())
            }
        }
    }
}
