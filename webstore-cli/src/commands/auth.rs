//! Authentication commands for the store CLI.
//!
//! Provides login, register, logout, and status commands. The bearer token
//! lives in the config file's `auth` section; login writes it and logout
//! removes it.

use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};
use serde_yaml::Value;
use std::io::{self, Write};

use webstore_core::{ApiGateway, GatewayError, Role, SignupRequest};

use crate::config::Config;

/// Authentication commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum RoleArg {
    #[default]
    Buyer,
    Seller,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Buyer => Role::Buyer,
            RoleArg::Seller => Role::Seller,
        }
    }
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Log in with email and password
    Login {
        /// Email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a new account
    Register {
        /// Email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted with confirmation if omitted)
        #[arg(long)]
        password: Option<String>,

        /// Phone number (prompted if omitted)
        #[arg(long)]
        phone: Option<String>,

        /// Account role
        #[arg(long, value_enum, default_value = "buyer")]
        role: RoleArg,
    },
    /// Log out (remove the stored token)
    Logout,
    /// Show authentication status
    Status,
}

impl AuthCommand {
    pub async fn run(&self, config: &Config, gateway: &ApiGateway) -> Result<(), AuthError> {
        match &self.command {
            AuthSubcommand::Login { email, password } => {
                login(config, gateway, email.as_deref(), password.as_deref()).await
            }
            AuthSubcommand::Register {
                email,
                password,
                phone,
                role,
            } => {
                register(
                    gateway,
                    email.as_deref(),
                    password.as_deref(),
                    phone.as_deref(),
                    (*role).into(),
                )
                .await
            }
            AuthSubcommand::Logout => logout(config),
            AuthSubcommand::Status => status(config),
        }
    }
}

/// Errors that can occur during authentication
#[derive(Debug)]
pub enum AuthError {
    /// I/O error
    IoError(io::Error),
    /// Remote call failed
    Gateway(GatewayError),
    /// Login succeeded at the HTTP level but no token came back
    InvalidCredentials,
    /// Register password confirmation did not match
    PasswordMismatch,
    /// Config file error
    ConfigError(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::IoError(e) => write!(f, "I/O error: {}", e),
            AuthError::Gateway(e) => write!(f, "{}", e),
            AuthError::InvalidCredentials => {
                write!(f, "Login failed: invalid credentials")
            }
            AuthError::PasswordMismatch => write!(f, "Passwords do not match"),
            AuthError::ConfigError(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<io::Error> for AuthError {
    fn from(e: io::Error) -> Self {
        AuthError::IoError(e)
    }
}

impl From<GatewayError> for AuthError {
    fn from(e: GatewayError) -> Self {
        AuthError::Gateway(e)
    }
}

/// Interactive login flow
async fn login(
    config: &Config,
    gateway: &ApiGateway,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), AuthError> {
    let email = resolve_or_prompt(email, "Enter your email: ")?;
    let password = resolve_or_prompt(password, "Enter your password: ")?;

    let response = gateway.login(&email, &password).await?;
    let token = response.token.ok_or(AuthError::InvalidCredentials)?;

    let config_path = config.config_path_for_writes();
    save_token(&token, &config_path)?;

    println!("Logged in as {}", email);
    println!("Token saved to {}", config_path.display());
    Ok(())
}

/// Interactive registration flow
async fn register(
    gateway: &ApiGateway,
    email: Option<&str>,
    password: Option<&str>,
    phone: Option<&str>,
    role: Role,
) -> Result<(), AuthError> {
    let email = resolve_or_prompt(email, "Enter your email: ")?;

    // Confirmation only applies to the interactive path; a --password flag
    // is taken as-is.
    let password = match password {
        Some(p) => p.to_string(),
        None => {
            let first = prompt("Enter a password: ")?;
            let confirm = prompt("Confirm password: ")?;
            if first != confirm {
                return Err(AuthError::PasswordMismatch);
            }
            first
        }
    };

    let phone = resolve_or_prompt(phone, "Enter your phone number: ")?;

    let request = SignupRequest {
        email: email.clone(),
        password,
        phone,
        role,
    };
    gateway.signup(&request).await?;

    println!("Account created for {}.", email);
    println!("Run 'store auth login' to sign in.");
    Ok(())
}

/// Remove the token from the config file
fn logout(config: &Config) -> Result<(), AuthError> {
    let config_path = config.config_path_for_writes();

    if !config_path.exists() {
        println!("Already logged out (no config file).");
        return Ok(());
    }

    clear_token(&config_path)?;
    println!("Logged out.");
    Ok(())
}

/// Show authentication status
fn status(config: &Config) -> Result<(), AuthError> {
    match &config.auth.token {
        Some(token) => {
            // Mask the token for display
            let masked = if token.len() > 8 {
                format!("{}...{}", &token[..4], &token[token.len() - 4..])
            } else {
                "****".to_string()
            };
            println!("Logged in (token: {})", masked);
            if let Some(at) = config.auth.logged_in_at {
                println!("Since: {}", at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        None => {
            println!("Not logged in. Run 'store auth login' to authenticate.");
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn resolve_or_prompt(value: Option<&str>, label: &str) -> Result<String, AuthError> {
    let resolved = match value {
        Some(v) => v.trim().to_string(),
        None => prompt(label)?,
    };

    if resolved.is_empty() {
        return Err(AuthError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Input cannot be empty",
        )));
    }
    Ok(resolved)
}

/// Save the bearer token (and login time) to the config file
pub(crate) fn save_token(token: &str, config_path: &std::path::Path) -> Result<(), AuthError> {
    // Read existing config or create new
    let mut config: Value = if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;
        serde_yaml::from_str(&contents).map_err(|e| AuthError::ConfigError(e.to_string()))?
    } else {
        Value::Mapping(serde_yaml::Mapping::new())
    };

    // Ensure auth section exists
    let mapping = config
        .as_mapping_mut()
        .ok_or_else(|| AuthError::ConfigError("Invalid config format".to_string()))?;

    let auth_key = Value::String("auth".to_string());
    if !mapping.contains_key(&auth_key) {
        mapping.insert(auth_key.clone(), Value::Mapping(serde_yaml::Mapping::new()));
    }

    if let Some(auth) = mapping.get_mut(&auth_key) {
        if let Some(auth_mapping) = auth.as_mapping_mut() {
            auth_mapping.insert(
                Value::String("token".to_string()),
                Value::String(token.to_string()),
            );
            auth_mapping.insert(
                Value::String("logged_in_at".to_string()),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
    }

    // Create config directory if needed
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    }

    let yaml = serde_yaml::to_string(&config).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    std::fs::write(config_path, yaml).map_err(|e| AuthError::ConfigError(e.to_string()))?;

    Ok(())
}

/// Remove the token from the config file's auth section
pub(crate) fn clear_token(config_path: &std::path::Path) -> Result<(), AuthError> {
    if !config_path.exists() {
        return Ok(());
    }

    let contents =
        std::fs::read_to_string(config_path).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    let mut yaml: Value =
        serde_yaml::from_str(&contents).map_err(|e| AuthError::ConfigError(e.to_string()))?;

    if let Some(mapping) = yaml.as_mapping_mut() {
        let auth_key = Value::String("auth".to_string());
        if let Some(auth) = mapping.get_mut(&auth_key) {
            if let Some(auth_mapping) = auth.as_mapping_mut() {
                auth_mapping.remove(Value::String("token".to_string()));
                auth_mapping.remove(Value::String("logged_in_at".to_string()));
            }
        }
    }

    let yaml_str = serde_yaml::to_string(&yaml).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    std::fs::write(config_path, yaml_str).map_err(|e| AuthError::ConfigError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_clear_token_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        save_token("tok-123", &config_path).unwrap();
        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.auth.token.as_deref(), Some("tok-123"));
        assert!(config.auth.logged_in_at.is_some());

        clear_token(&config_path).unwrap();
        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.auth.token.is_none());
        assert!(config.auth.logged_in_at.is_none());
    }

    #[test]
    fn test_save_token_preserves_other_settings() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "user_service_url: http://localhost:3001\n").unwrap();

        save_token("tok-456", &config_path).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.user_service_url.value, "http://localhost:3001");
        assert_eq!(config.auth.token.as_deref(), Some("tok-456"));
    }

    #[test]
    fn test_clear_token_without_config_file_is_ok() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.yaml");
        assert!(clear_token(&config_path).is_ok());
    }
}
