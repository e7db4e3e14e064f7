//! Webstore Core Library
//!
//! Shared types and logic for the webstore client: data models, the remote
//! service gateway, the authenticated session context, and the
//! cart/wishlist membership tracker with its local persistence mirror.

pub mod gateway;
pub mod membership;
pub mod mirror;
pub mod models;
pub mod session;

pub use gateway::{ApiGateway, GatewayError, LoginResponse, SignupRequest};
pub use membership::{Intent, MembershipError, MembershipTracker};
pub use mirror::{MirrorError, MirrorStore, StoreKey};
pub use models::{
    clamp_quantity, CartContents, CartEntry, OrderRequest, Product, ProductDraft, ProductId,
    Profile, Role, ORDER_STATUS_PLACED,
};
pub use session::AuthSession;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
