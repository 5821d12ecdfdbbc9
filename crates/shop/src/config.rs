//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_API_URL` - Base URL of the Career Closet backend
//!
//! ## Optional
//! - `SHOP_CURRENCY` - Currency symbol used for display (default: R)
//! - `SHOP_DELIVERY_FEE` - Flat delivery fee added at checkout (default: 10)
//! - `SHOP_AUTH_STATE` - Path of the persisted auth token file
//!   (default: .closet-auth.json)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

/// Default currency symbol (South African Rand).
const DEFAULT_CURRENCY: &str = "R";

/// Default flat delivery fee, in catalog price units.
const DEFAULT_DELIVERY_FEE: &str = "10";

/// Default location of the persisted auth token.
const DEFAULT_AUTH_STATE: &str = ".closet-auth.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Base URL of the backend API.
    pub api_url: Url,
    /// Currency symbol for display.
    pub currency: String,
    /// Flat delivery fee added to the cart subtotal at checkout.
    pub delivery_fee: Decimal,
    /// Where the auth token is persisted across runs.
    pub auth_state_path: PathBuf,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("SHOP_API_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_API_URL".to_string(), e.to_string()))?;
        let currency = get_env_or_default("SHOP_CURRENCY", DEFAULT_CURRENCY);
        let delivery_fee = get_env_or_default("SHOP_DELIVERY_FEE", DEFAULT_DELIVERY_FEE)
            .parse::<Decimal>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_DELIVERY_FEE".to_string(), e.to_string())
            })?;
        let auth_state_path =
            PathBuf::from(get_env_or_default("SHOP_AUTH_STATE", DEFAULT_AUTH_STATE));

        Ok(Self {
            api_url,
            currency,
            delivery_fee,
            auth_state_path,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// Currency, delivery fee, and auth state path take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not a valid URL.
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: api_url.parse::<Url>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_API_URL".to_string(), e.to_string())
            })?,
            currency: DEFAULT_CURRENCY.to_string(),
            delivery_fee: Decimal::from(10),
            auth_state_path: PathBuf::from(DEFAULT_AUTH_STATE),
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
