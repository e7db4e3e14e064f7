mod auth;
mod cart;
mod config_cmd;
mod order;
mod product;
mod products;
mod profile;
mod wishlist;

pub use auth::AuthCommand;
pub use cart::CartCommand;
pub use config_cmd::ConfigCommand;
pub use order::OrderCommand;
pub use product::ProductCommand;
pub use products::ProductsCommand;
pub use profile::ProfileCommand;
pub use wishlist::WishlistCommand;

use crate::config::Config;

/// A 401 means the stored token is stale: discard it so the next command
/// starts from a clean logged-out state, and tell the user.
pub(crate) fn session_expired(config: &Config) -> Box<dyn std::error::Error> {
    let _ = auth::clear_token(&config.config_path_for_writes());
    "Session expired. Please log in again.".into()
}
