//! Remote service gateway.
//!
//! Thin HTTP wrappers over the user service (auth, profile, cart, wishlist,
//! orders) and the product service (catalog, product CRUD). Every call is
//! request -> JSON body on 2xx, or a [`GatewayError`] on anything else; a
//! 401 is special-cased so the consuming layer can force a logout.

mod client;
mod error;

pub use client::{ApiGateway, LoginResponse, SignupRequest};
pub use error::GatewayError;
