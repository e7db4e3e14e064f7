use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Default base URL of the user service (auth, profile, cart, orders).
pub const DEFAULT_USER_SERVICE_URL: &str = "https://webstore-userservice.onrender.com";
/// Default base URL of the product service (catalog, product CRUD).
pub const DEFAULT_PRODUCT_SERVICE_URL: &str = "https://webstore-productservice.onrender.com";

/// Auth section of the config file. Login writes it, logout clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Bearer token issued by the user service
    pub token: Option<String>,
    /// When the token was obtained
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl AuthConfig {
    /// Returns true if a token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the user service
    pub user_service_url: ConfigValue<String>,
    /// Base URL of the product service
    pub product_service_url: ConfigValue<String>,
    /// Directory for the cart/wishlist mirror files
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Auth state
    pub auth: AuthConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    user_service_url: Option<String>,
    product_service_url: Option<String>,
    data_dir: Option<PathBuf>,
    auth: Option<AuthConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut user_service_url = ConfigValue::new(
            DEFAULT_USER_SERVICE_URL.to_string(),
            ConfigSource::Default,
        );
        let mut product_service_url = ConfigValue::new(
            DEFAULT_PRODUCT_SERVICE_URL.to_string(),
            ConfigSource::Default,
        );
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut config_file = None;
        let mut auth = AuthConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.user_service_url {
                user_service_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(url) = file_config.product_service_url {
                product_service_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(auth_config) = file_config.auth {
                auth = auth_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("STORE_USER_SERVICE_URL") {
            user_service_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("STORE_PRODUCT_SERVICE_URL") {
            product_service_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("STORE_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(token) = std::env::var("STORE_TOKEN") {
            auth.token = Some(token);
        }

        Ok(Self {
            user_service_url,
            product_service_url,
            data_dir,
            config_file,
            auth,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/store/
    /// - macOS: ~/Library/Application Support/store/
    /// - Windows: %APPDATA%/store/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("store")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/store/
    /// - macOS: ~/Library/Application Support/store/
    /// - Windows: %APPDATA%/store/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("store")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    /// The config file to rewrite when auth state changes.
    pub fn config_path_for_writes(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(Self::default_config_path)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
