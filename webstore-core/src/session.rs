//! Authenticated session context.
//!
//! An [`AuthSession`] is an explicit object passed to every authenticated
//! gateway call. Login constructs one from the token the user service
//! issued; logout simply drops it and removes the persisted token. There is
//! no ambient global auth state.

use crate::models::Profile;

/// Bearer token plus, once fetched, the user's profile.
#[derive(Debug, Clone)]
pub struct AuthSession {
    token: String,
    profile: Option<Profile>,
}

impl AuthSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            profile: None,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the Authorization header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// True once a profile has been fetched and it carries the Seller role.
    pub fn is_seller(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::is_seller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_bearer_header() {
        let session = AuthSession::new("tok123");
        assert_eq!(session.token(), "tok123");
        assert_eq!(session.bearer(), "Bearer tok123");
    }

    #[test]
    fn test_seller_requires_profile() {
        let mut session = AuthSession::new("tok");
        assert!(!session.is_seller());

        session.set_profile(Profile {
            email: "s@example.com".to_string(),
            phone: String::new(),
            role: Role::Seller,
        });
        assert!(session.is_seller());
        assert_eq!(session.profile().unwrap().email, "s@example.com");
    }
}
