//! Checkout orchestration.
//!
//! Thin glue over the other stores: validate preconditions without
//! touching the network, submit the cart snapshot, then clear the local
//! cart line by line. The backend clears its copy of the cart as part of
//! order placement; the per-line `set_quantity(.., 0)` calls keep the
//! local aggregate and any stragglers on the server in step with that.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Order, OrderRequest, PaymentMethod, ShippingInfo};
use crate::stores::cart::CartManager;
use crate::stores::catalog::CatalogCache;
use crate::stores::session::SessionStore;

/// Errors surfaced by order placement.
///
/// The validation variants are produced before any network call.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No user is logged in.
    #[error("you must be logged in to place an order")]
    NotAuthenticated,

    /// A shipping field is blank.
    #[error("missing shipping field: {0}")]
    MissingShippingField(&'static str),

    /// The cart holds no lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// The backend rejected or failed the order.
    #[error("failed to place order: {0}")]
    Api(#[from] ApiError),
}

/// Submit the current cart as an order.
///
/// Preconditions (checked in this order, before any network call):
/// authenticated session, all shipping fields non-blank, non-empty cart.
/// The order total is the cart subtotal plus the flat delivery fee. On
/// success every local line is cleared via one `set_quantity(.., 0)` call
/// and the server's order record is returned for the confirmation view.
///
/// # Errors
///
/// Returns a specific `CheckoutError` for each violated precondition, or
/// the backend's rejection.
pub async fn place_order(
    api: &ApiClient,
    session: &SessionStore,
    cart: &mut CartManager,
    catalog: &CatalogCache,
    shipping: &ShippingInfo,
    payment_method: PaymentMethod,
    delivery_fee: Decimal,
) -> Result<Order, CheckoutError> {
    let Some(user_id) = session.user_id() else {
        return Err(CheckoutError::NotAuthenticated);
    };
    if let Some(field) = shipping.first_blank_field() {
        return Err(CheckoutError::MissingShippingField(field));
    }
    if cart.items().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let request = OrderRequest {
        user_id: user_id.clone(),
        items: cart.items().clone(),
        total_amount: cart.amount(catalog) + delivery_fee,
        shipping_address: shipping.clone(),
        payment_method,
    };

    let order = match api.place_order(&request).await {
        Ok(order) => order,
        Err(e) => {
            warn!(error = %e, "order placement failed");
            return Err(e.into());
        }
    };

    debug!(order_id = %order.id, "order placed");

    // Clear the local cart one line at a time.
    let lines: Vec<_> = cart.lines().collect();
    for line in lines {
        cart.set_quantity(session, &line.product_id, &line.size, 0)
            .await;
    }

    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;
    use crate::stores::session::TokenCache;

    fn api() -> ApiClient {
        let config = ShopConfig::with_api_url("http://localhost:3000").unwrap();
        ApiClient::new(&config).unwrap()
    }

    fn filled_shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            address: "1 Long St".to_string(),
            city: "Cape Town".to_string(),
            postal_code: "8001".to_string(),
            country: "ZA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rejects_unauthenticated_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::new(api(), TokenCache::new(dir.path().join("auth.json")));
        let mut cart = CartManager::new(api());
        let catalog = CatalogCache::new(api());

        let result = place_order(
            &api(),
            &session,
            &mut cart,
            &catalog,
            &filled_shipping(),
            PaymentMethod::CreditCard,
            Decimal::from(10),
        )
        .await;
        assert!(matches!(result, Err(CheckoutError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_rejects_blank_shipping_field_before_empty_cart_check() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::new(api(), TokenCache::new(dir.path().join("auth.json")));
        session.set_user_for_tests("u1");
        let mut cart = CartManager::new(api());
        let catalog = CatalogCache::new(api());

        let mut shipping = filled_shipping();
        shipping.city = "  ".to_string();

        let result = place_order(
            &api(),
            &session,
            &mut cart,
            &catalog,
            &shipping,
            PaymentMethod::Paypal,
            Decimal::from(10),
        )
        .await;
        assert!(matches!(
            result,
            Err(CheckoutError::MissingShippingField("city"))
        ));
    }

    #[tokio::test]
    async fn test_rejects_empty_cart_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::new(api(), TokenCache::new(dir.path().join("auth.json")));
        session.set_user_for_tests("u1");
        let mut cart = CartManager::new(api());
        let catalog = CatalogCache::new(api());

        let result = place_order(
            &api(),
            &session,
            &mut cart,
            &catalog,
            &filled_shipping(),
            PaymentMethod::CreditCard,
            Decimal::from(10),
        )
        .await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(cart.items().is_empty());
    }
}
