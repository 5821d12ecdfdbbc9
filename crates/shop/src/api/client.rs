//! Backend API client implementation.
//!
//! One `reqwest::Client` shared behind an `Arc`; cheap to clone. Error
//! bodies are read as text first so a failed call always yields a usable
//! message even when the backend sends a non-JSON error page.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use career_closet_core::{ProductId, UserId};

use crate::api::ApiError;
use crate::config::ShopConfig;
use crate::models::{CartAggregate, Order, OrderRequest, Product, UserProfile};

/// How long a single-product lookup stays cached.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached single-product lookups.
const PRODUCT_CACHE_CAPACITY: u64 = 1000;

/// Client for the Career Closet backend REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    product_cache: Cache<ProductId, Product>,
}

/// Body of `POST /signup`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest<'a> {
    user_name: &'a str,
    email: &'a str,
    password: &'a str,
    confirm_password: &'a str,
}

/// Response of `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /checkpassword`.
#[derive(Debug, Serialize)]
struct CheckPasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response of `POST /checkpassword`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPasswordResponse {
    pub valid: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /cart/{userId}`.
#[derive(Debug, Deserialize)]
struct CartResponse {
    #[serde(default)]
    items: CartAggregate,
}

/// Body of `POST /cart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddCartItemRequest<'a> {
    user_id: &'a UserId,
    item_id: &'a ProductId,
    size: &'a str,
    quantity: u32,
}

/// Body of `PUT /cart/{userId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCartItemRequest<'a> {
    item_id: &'a ProductId,
    size: &'a str,
    quantity: u32,
}

/// Error shape the backend uses for failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ShopConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        let product_cache = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                product_cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("products")?;
        let response = self.inner.client.get(url).send().await?;
        decode(response).await
    }

    /// Fetch a single product by ID.
    ///
    /// This is the deep-link fallback for products not present in the
    /// catalog cache; responses are cached for five minutes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.inner.product_cache.get(id).await {
            debug!(product_id = %id, "product cache hit");
            return Ok(product);
        }

        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.inner.client.get(url).send().await?;
        let product: Product = decode(response).await?;

        self.inner
            .product_cache
            .insert(id.clone(), product.clone())
            .await;

        Ok(product)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Fetch the user record behind a persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is stale or the request fails.
    pub async fn get_user(&self, user_id: &UserId) -> Result<UserProfile, ApiError> {
        let url = self.endpoint(&format!("user/{user_id}"))?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(user_id.as_str())
            .send()
            .await?;
        decode(response).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message when the signup
    /// is rejected (e.g. the email is already registered).
    pub async fn sign_up(
        &self,
        user_name: &str,
        email: &str,
        password: &SecretString,
        confirm_password: &SecretString,
    ) -> Result<SignupResponse, ApiError> {
        let url = self.endpoint("signup")?;
        let body = SignupRequest {
            user_name,
            email,
            password: password.expose_secret(),
            confirm_password: confirm_password.expose_secret(),
        };
        let response = self.inner.client.post(url).json(&body).send().await?;
        decode(response).await
    }

    /// Check credentials against the backend.
    ///
    /// A wrong password is not an `Err`: the backend answers 2xx with
    /// `valid: false`, and the caller decides how to surface that.
    ///
    /// # Errors
    ///
    /// Returns an error if the request itself fails.
    pub async fn check_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<CheckPasswordResponse, ApiError> {
        let url = self.endpoint("checkpassword")?;
        let body = CheckPasswordRequest {
            email,
            password: password.expose_secret(),
        };
        let response = self.inner.client.post(url).json(&body).send().await?;
        decode(response).await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Fetch the persisted cart for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn get_cart(&self, user_id: &UserId) -> Result<CartAggregate, ApiError> {
        let url = self.endpoint(&format!("cart/{user_id}"))?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(user_id.as_str())
            .send()
            .await?;
        let cart: CartResponse = decode(response).await?;
        Ok(cart.items)
    }

    /// Persist a new cart line (or a new quantity after an add).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub async fn add_cart_item(
        &self,
        user_id: &UserId,
        item_id: &ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("cart")?;
        let body = AddCartItemRequest {
            user_id,
            item_id,
            size,
            quantity,
        };
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(user_id.as_str())
            .json(&body)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Persist an exact quantity for an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub async fn update_cart_item(
        &self,
        user_id: &UserId,
        item_id: &ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/{user_id}"))?;
        let body = UpdateCartItemRequest {
            item_id,
            size,
            quantity,
        };
        let response = self
            .inner
            .client
            .put(url)
            .bearer_auth(user_id.as_str())
            .json(&body)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Remove a cart line on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    pub async fn delete_cart_item(
        &self,
        user_id: &UserId,
        item_id: &ProductId,
        size: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/{user_id}/{item_id}/{size}"))?;
        let response = self
            .inner
            .client
            .delete(url)
            .bearer_auth(user_id.as_str())
            .send()
            .await?;
        expect_success(response).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Order, ApiError> {
        let url = self.endpoint("orders")?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(order.user_id.as_str())
            .json(order)
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a JSON response body, mapping non-success statuses to `ApiError`.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(error_from(status, &text));
    }

    Ok(serde_json::from_str(&text)?)
}

/// Require a success status, ignoring the body.
async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let text = response.text().await.unwrap_or_default();
    Err(error_from(status, &text))
}

fn error_from(status: reqwest::StatusCode, body: &str) -> ApiError {
    // Prefer the backend's own message when the body is its error shape.
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.chars().take(200).collect());

    if status == reqwest::StatusCode::NOT_FOUND {
        return ApiError::NotFound(message);
    }

    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_prefers_backend_message() {
        let err = error_from(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message": "email already registered"}"#,
        );
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "email already registered");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_from_truncates_non_json_body() {
        let body = "x".repeat(500);
        let err = error_from(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::Api { message, .. } => assert_eq!(message.len(), 200),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_from_maps_404_to_not_found() {
        let err = error_from(reqwest::StatusCode::NOT_FOUND, r#"{"message": "no such"}"#);
        assert!(matches!(err, ApiError::NotFound(m) if m == "no such"));
    }

    #[test]
    fn test_request_bodies_use_backend_field_names() {
        let user_id = UserId::new("u1");
        let item_id = ProductId::new("p1");
        let body = AddCartItemRequest {
            user_id: &user_id,
            item_id: &item_id,
            size: "M",
            quantity: 2,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["itemId"], "p1");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_check_password_response_tolerates_minimal_body() {
        let response: CheckPasswordResponse =
            serde_json::from_str(r#"{"valid": false, "message": "Invalid credentials"}"#).unwrap();
        assert!(!response.valid);
        assert!(response.user_id.is_none());
    }
}
