//! Unified error type for callers that don't care which layer failed.
//!
//! The stores keep their own error enums (`ApiError`, `AuthError`,
//! `CheckoutError`) because the view layer treats them differently;
//! `ShopError` is the umbrella for code paths (the CLI, mostly) that just
//! need one `Result` type.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::stores::checkout::CheckoutError;
use crate::stores::session::AuthError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `ShopError`.
pub type Result<T> = std::result::Result<T, ShopError>;
