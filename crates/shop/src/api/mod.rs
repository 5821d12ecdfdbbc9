//! HTTP client for the Career Closet backend.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`; the backend is the source of truth
//!   for products, accounts, carts, and orders
//! - The user ID doubles as the bearer credential on authenticated routes
//! - Single-product lookups (the deep-link path) are cached in memory via
//!   `moka` with a 5 minute TTL; the full product list is not cached here,
//!   the catalog store owns that copy
//!
//! # Example
//!
//! ```rust,ignore
//! use career_closet_shop::api::ApiClient;
//!
//! let api = ApiClient::new(&config)?;
//! let products = api.list_products().await?;
//! let cart = api.get_cart(&user_id).await?;
//! ```

mod client;

pub use client::{ApiClient, CheckPasswordResponse, SignupResponse};

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body was not the expected JSON shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
