//! Catalog product types.
//!
//! Products are owned by the remote product service; the client never
//! invents IDs, it only round-trips the ones the service hands out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a catalog item, as issued by the product service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A catalog product as returned by the product service.
///
/// The service is MongoDB-backed, so the ID field arrives as `_id` and the
/// category as `type`. Fields the service occasionally omits default to
/// empty rather than failing the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub img: String,
    pub price: f64,
    #[serde(default)]
    pub available: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub stock: u32,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let availability = if self.available {
            "in stock"
        } else {
            "out of stock"
        };
        write!(
            f,
            "{} - ${:.2} ({}, {})",
            self.name, self.price, self.kind, availability
        )
    }
}

/// Payload for creating or updating a product. The seller supplies every
/// field; the service assigns the ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub desc: String,
    pub img: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stock: u32,
    pub price: f64,
    pub available: bool,
}
