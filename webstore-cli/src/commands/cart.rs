//! Shopping cart commands.
//!
//! Mutations go through the membership tracker so the local mirror stays in
//! step with the remote cart; `show` pulls the remote record and reconciles
//! the mirror against it (remote wins).

use clap::{Args, Subcommand, ValueEnum};

use webstore_core::{
    clamp_quantity, ApiGateway, AuthSession, Intent, MembershipError, MembershipTracker, ProductId,
};

use super::session_expired;
use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Shopping cart commands
#[derive(Args)]
pub struct CartCommand {
    #[command(subcommand)]
    pub command: CartSubcommand,
}

#[derive(Subcommand)]
pub enum CartSubcommand {
    /// Show the cart as the service records it
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a product to the cart
    Add {
        /// Product ID
        id: String,

        /// Quantity (minimum 1)
        #[arg(long, short, default_value_t = 1)]
        qty: i64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: String,
    },
}

impl CartCommand {
    pub async fn run(
        &self,
        config: &Config,
        gateway: &ApiGateway,
        session: &AuthSession,
        tracker: &MembershipTracker,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CartSubcommand::Show { format } => {
                let cart = gateway.cart(session).await.map_err(|e| {
                    if e.is_session_expired() {
                        session_expired(config)
                    } else {
                        e.into()
                    }
                })?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&cart)?);
                    }
                    OutputFormat::Table => {
                        if cart.is_empty() {
                            println!("Cart is empty.");
                        } else {
                            println!("Cart");
                            println!("{}", "=".repeat(52));
                            for entry in &cart.items {
                                println!(
                                    "{:<28} x{:<4} ${:<8.2} ${:.2}",
                                    entry.product.name,
                                    entry.amount,
                                    entry.product.price,
                                    entry.product.price * entry.amount as f64
                                );
                            }
                            println!("{}", "-".repeat(52));
                            println!("Total: ${:.2}", cart.total());
                        }
                    }
                }

                tracker.reconcile(cart.product_ids())?;
                Ok(())
            }

            CartSubcommand::Add { id, qty } => {
                let id = ProductId::from(id.as_str());
                let quantity = clamp_quantity(*qty);

                let result = tracker
                    .apply(&id, Intent::Add, || {
                        gateway.add_to_cart(session, &id, quantity)
                    })
                    .await;

                match result {
                    Ok(()) => {
                        println!("Added '{}' to cart (qty {})", id, quantity);
                        Ok(())
                    }
                    Err(MembershipError::Remote(e)) if e.is_session_expired() => {
                        Err(session_expired(config))
                    }
                    Err(e) => Err(e.into()),
                }
            }

            CartSubcommand::Remove { id } => {
                let id = ProductId::from(id.as_str());

                let result = tracker
                    .apply(&id, Intent::Remove, || {
                        gateway.remove_from_cart(session, &id)
                    })
                    .await;

                match result {
                    Ok(()) => {
                        println!("Removed '{}' from cart", id);
                        Ok(())
                    }
                    Err(MembershipError::Remote(e)) if e.is_session_expired() => {
                        Err(session_expired(config))
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }
}
