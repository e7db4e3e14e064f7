//! User profile returned by the user service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Sellers may create and edit products; buyers may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Buyer,
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Buyer => write!(f, "Buyer"),
            Role::Seller => write!(f, "Seller"),
        }
    }
}

/// The GET /profile response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
}

impl Profile {
    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }
}
