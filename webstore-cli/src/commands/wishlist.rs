//! Wishlist commands.
//!
//! The wishlist service exposes no read endpoint, so `show` lists the local
//! mirror; add and remove go through the membership tracker like the cart.

use clap::{Args, Subcommand};

use webstore_core::{
    ApiGateway, AuthSession, Intent, MembershipError, MembershipTracker, ProductId,
};

use super::session_expired;
use crate::config::Config;

/// Wishlist commands
#[derive(Args)]
pub struct WishlistCommand {
    #[command(subcommand)]
    pub command: WishlistSubcommand,
}

#[derive(Subcommand)]
pub enum WishlistSubcommand {
    /// List wishlist product IDs (from the local mirror)
    Show,

    /// Add a product to the wishlist
    Add {
        /// Product ID
        id: String,
    },

    /// Remove a product from the wishlist
    Remove {
        /// Product ID
        id: String,
    },
}

impl WishlistCommand {
    pub async fn run(
        &self,
        config: &Config,
        gateway: &ApiGateway,
        session: &AuthSession,
        tracker: &MembershipTracker,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WishlistSubcommand::Show => {
                let items = tracker.items();
                if items.is_empty() {
                    println!("Wishlist is empty.");
                } else {
                    println!("Wishlist ({} items)", items.len());
                    for id in items {
                        println!("  {}", id);
                    }
                }
                Ok(())
            }

            WishlistSubcommand::Add { id } => {
                let id = ProductId::from(id.as_str());

                let result = tracker
                    .apply(&id, Intent::Add, || gateway.add_to_wishlist(session, &id))
                    .await;

                match result {
                    Ok(()) => {
                        println!("Added '{}' to wishlist", id);
                        Ok(())
                    }
                    Err(MembershipError::Remote(e)) if e.is_session_expired() => {
                        Err(session_expired(config))
                    }
                    Err(e) => Err(e.into()),
                }
            }

            WishlistSubcommand::Remove { id } => {
                let id = ProductId::from(id.as_str());

                let result = tracker
                    .apply(&id, Intent::Remove, || {
                        gateway.remove_from_wishlist(session, &id)
                    })
                    .await;

                match result {
                    Ok(()) => {
                        println!("Removed '{}' from wishlist", id);
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
