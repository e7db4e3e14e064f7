//! Seller-side product management.
//!
//! Create and update are gated on the Seller role; the profile is fetched
//! first and the enriched session carries it for the rest of the command.

use clap::{ArgAction, Args, Subcommand};

use webstore_core::{ApiGateway, AuthSession, ProductDraft, ProductId};

use super::session_expired;
use crate::config::Config;

#[derive(Args)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand)]
pub enum ProductSubcommand {
    /// Show a single product
    Show {
        /// Product ID
        id: String,
    },

    /// Create a new product (sellers only)
    Create {
        /// Product name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long)]
        desc: String,

        /// Image URL
        #[arg(long, default_value = "")]
        img: String,

        /// Category (e.g. "Electronics", "Fashion")
        #[arg(long)]
        category: String,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Price
        #[arg(long)]
        price: f64,

        /// Whether the product is available for sale
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        available: bool,
    },

    /// Update an existing product (sellers only)
    Update {
        /// Product ID
        id: String,

        /// Product name
        #[arg(long)]
        name: Option<String>,

        /// Description
        #[arg(long)]
        desc: Option<String>,

        /// Image URL
        #[arg(long)]
        img: Option<String>,

        /// Category
        #[arg(long)]
        category: Option<String>,

        /// Units in stock
        #[arg(long)]
        stock: Option<u32>,

        /// Price
        #[arg(long)]
        price: Option<f64>,

        /// Whether the product is available for sale
        #[arg(long, action = ArgAction::Set)]
        available: Option<bool>,
    },
}

impl ProductCommand {
    pub async fn run(
        &self,
        config: &Config,
        gateway: &ApiGateway,
        session: &AuthSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProductSubcommand::Show { id } => {
                let id = ProductId::from(id.as_str());
                let product = gateway.product(session, &id).await.map_err(|e| {
                    if e.is_session_expired() {
                        session_expired(config)
                    } else {
                        e.into()
                    }
                })?;

                println!("{}", product.name);
                println!("{}", "=".repeat(product.name.len()));
                if !product.desc.is_empty() {
                    println!("{}", product.desc);
                }
                println!("Category:  {}", product.kind);
                println!("Price:     ${:.2}", product.price);
                println!(
                    "Stock:     {} ({})",
                    product.stock,
                    if product.available {
                        "available"
                    } else {
                        "unavailable"
                    }
                );
                if !product.img.is_empty() {
                    println!("Image:     {}", product.img);
                }
                println!("ID:        {}", product.id);
                Ok(())
            }

            ProductSubcommand::Create {
                name,
                desc,
                img,
                category,
                stock,
                price,
                available,
            } => {
                let session = seller_session(config, gateway, session).await?;

                let draft = ProductDraft {
                    name: name.clone(),
                    desc: desc.clone(),
                    img: img.clone(),
                    kind: category.clone(),
                    stock: *stock,
                    price: *price,
                    available: *available,
                };

                gateway.create_product(&session, &draft).await.map_err(|e| {
                    if e.is_session_expired() {
                        session_expired(config)
                    } else {
                        e.into()
                    }
                })?;

                println!("Product created: {}", name);
                Ok(())
            }

            ProductSubcommand::Update {
                id,
                name,
                desc,
                img,
                category,
                stock,
                price,
                available,
            } => {
                let session = seller_session(config, gateway, session).await?;
                let id = ProductId::from(id.as_str());

                // Fetch the current record and apply only the given fields,
                // so a partial update does not blank the rest.
                let current = gateway.product(&session, &id).await?;
                let draft = ProductDraft {
                    name: name.clone().unwrap_or(current.name),
                    desc: desc.clone().unwrap_or(current.desc),
                    img: img.clone().unwrap_or(current.img),
                    kind: category.clone().unwrap_or(current.kind),
                    stock: stock.unwrap_or(current.stock),
                    price: price.unwrap_or(current.price),
                    available: available.unwrap_or(current.available),
                };

                gateway
                    .update_product(&session, &id, &draft)
                    .await
                    .map_err(|e| {
                        if e.is_session_expired() {
                            session_expired(config)
                        } else {
                            e.into()
                        }
                    })?;

                println!("Product updated: {}", id);
                Ok(())
            }
        }
    }
}

/// Fetch the profile and return a session that carries it, failing unless
/// the account has the Seller role.
async fn seller_session(
    config: &Config,
    gateway: &ApiGateway,
    session: &AuthSession,
) -> Result<AuthSession, Box<dyn std::error::Error>> {
    let mut session = session.clone();
    let profile = gateway.profile(&session).await.map_err(|e| {
        if e.is_session_expired() {
            session_expired(config)
        } else {
            e.into()
        }
    })?;
    session.set_profile(profile);

    if !session.is_seller() {
        return Err("Only sellers can create or update products.".into());
    }
    Ok(session)
}
