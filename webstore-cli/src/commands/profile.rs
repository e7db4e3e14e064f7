//! Profile command.

use clap::Args;

use webstore_core::{ApiGateway, AuthSession};

use super::session_expired;
use crate::config::Config;

/// Show the authenticated user's profile
#[derive(Args)]
pub struct ProfileCommand {}

impl ProfileCommand {
    pub async fn run(
        &self,
        config: &Config,
        gateway: &ApiGateway,
        session: &AuthSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let profile = gateway.profile(session).await.map_err(|e| {
            if e.is_session_expired() {
                session_expired(config)
            } else {
                e.into()
            }
        })?;

        println!("Email: {}", profile.email);
        if !profile.phone.is_empty() {
            println!("Phone: {}", profile.phone);
        }
        println!("Role:  {}", profile.role);
        Ok(())
    }
}
