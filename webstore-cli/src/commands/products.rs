//! Catalog listing command.

use clap::{Args, ValueEnum};

use webstore_core::{ApiGateway, AuthSession, MembershipTracker, Product};

use super::session_expired;
use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// List products in a category
#[derive(Args)]
pub struct ProductsCommand {
    /// Product category (e.g. "Electronics", "Fashion")
    #[arg(long)]
    pub category: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ProductsCommand {
    pub async fn run(
        &self,
        config: &Config,
        gateway: &ApiGateway,
        session: &AuthSession,
        cart: &MembershipTracker,
        wishlist: &MembershipTracker,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let products = gateway
            .products_by_category(session, &self.category)
            .await
            .map_err(|e| {
                if e.is_session_expired() {
                    session_expired(config)
                } else {
                    e.into()
                }
            })?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&products)?);
            }
            OutputFormat::Table => {
                if products.is_empty() {
                    println!("No products available in '{}'.", self.category);
                    return Ok(());
                }

                println!("Products - {}", self.category);
                println!("{}", "=".repeat(60));
                for product in &products {
                    println!("{}", format_row(product, cart, wishlist));
                }
                println!("{}", "-".repeat(60));
                println!("{} products", products.len());
            }
        }

        Ok(())
    }
}

/// One table row: membership markers, name, price, availability, id.
fn format_row(product: &Product, cart: &MembershipTracker, wishlist: &MembershipTracker) -> String {
    let in_cart = if cart.contains(&product.id) { "C" } else { " " };
    let in_wishlist = if wishlist.contains(&product.id) {
        "W"
    } else {
        " "
    };
    let availability = if product.available {
        format!("stock {}", product.stock)
    } else {
        "out of stock".to_string()
    };

    format!(
        "[{}{}] {:<28} ${:<9.2} {:<14} {}",
        in_cart, in_wishlist, product.name, product.price, availability, product.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use webstore_core::{MirrorStore, ProductId, StoreKey};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: "Tote".to_string(),
            desc: String::new(),
            img: String::new(),
            price: 12.5,
            available: true,
            kind: "Fashion".to_string(),
            stock: 4,
        }
    }

    fn trackers(temp_dir: &TempDir) -> (MembershipTracker, MembershipTracker) {
        let mirror = MirrorStore::new(temp_dir.path().to_path_buf());
        (
            MembershipTracker::open(StoreKey::Cart, mirror.clone()),
            MembershipTracker::open(StoreKey::Wishlist, mirror),
        )
    }

    #[test]
    fn test_format_row_marks_memberships() {
        let temp_dir = TempDir::new().unwrap();
        let (cart, wishlist) = trackers(&temp_dir);
        cart.reconcile([ProductId::from("p1")].into_iter().collect())
            .unwrap();

        let row = format_row(&product("p1"), &cart, &wishlist);
        assert!(row.starts_with("[C ]"));
        assert!(row.contains("Tote"));
        assert!(row.contains("stock 4"));

        let row = format_row(&product("p2"), &cart, &wishlist);
        assert!(row.starts_with("[  ]"));
    }

    #[test]
    fn test_format_row_out_of_stock() {
        let temp_dir = TempDir::new().unwrap();
        let (cart, wishlist) = trackers(&temp_dir);

        let mut p = product("p3");
        p.available = false;
        let row = format_row(&p, &cart, &wishlist);
        assert!(row.contains("out of stock"));
    }
}
