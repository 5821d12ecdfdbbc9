//! Application root: one explicitly owned object holding every store.
//!
//! The view layer is handed `&Shop`/`&mut Shop`; there is no ambient
//! global. Cross-store rules live here: login triggers a cart load,
//! logout and a failed session restore clear the user-scoped cart.

use rust_decimal::Decimal;
use secrecy::SecretString;

use career_closet_core::ProductId;

use crate::api::ApiClient;
use crate::config::ShopConfig;
use crate::error::ShopError;
use crate::models::{Order, PaymentMethod, ShippingInfo};
use crate::stores::cart::CartManager;
use crate::stores::catalog::CatalogCache;
use crate::stores::checkout::{self, CheckoutError};
use crate::stores::session::{AuthError, SessionStore, TokenCache};

/// The storefront application state.
pub struct Shop {
    config: ShopConfig,
    api: ApiClient,
    session: SessionStore,
    catalog: CatalogCache,
    cart: CartManager,
}

impl Shop {
    /// Build the application root from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ShopConfig) -> Result<Self, ShopError> {
        let api = ApiClient::new(&config)?;
        let tokens = TokenCache::new(config.auth_state_path.clone());

        Ok(Self {
            session: SessionStore::new(api.clone(), tokens),
            catalog: CatalogCache::new(api.clone()),
            cart: CartManager::new(api.clone()),
            api,
            config,
        })
    }

    /// Session startup: restore identity, load the catalog, and load the
    /// user's cart when the restore succeeded.
    ///
    /// Nothing here surfaces an error; both restore and catalog load are
    /// recoverable-silent, and a failed cart load sets the cart's own
    /// sticky error flag.
    pub async fn start(&mut self) {
        self.session.restore().await;
        self.catalog.load().await;

        if let Some(user_id) = self.session.user_id() {
            let user_id = user_id.clone();
            self.cart.load(&user_id).await;
        } else {
            // Cart is user-scoped: a failed or absent restore means empty.
            self.cart.clear();
        }
    }

    /// Log in and pull the user's persisted cart.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error for inline display; the
    /// session and cart are untouched on failure.
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<(), AuthError> {
        self.session.login(email, password).await?;

        if let Some(user_id) = self.session.user_id() {
            let user_id = user_id.clone();
            self.cart.load(&user_id).await;
        }
        Ok(())
    }

    /// Log out: drop the identity, the persisted token, and the cart.
    pub fn logout(&mut self) {
        self.session.logout();
        self.cart.clear();
    }

    /// Add one unit of `(product, size)` to the cart.
    pub async fn add_to_cart(&mut self, product_id: &ProductId, size: &str) {
        self.cart.add_line(&self.session, product_id, size).await;
    }

    /// Set a cart line to an exact quantity; 0 removes it.
    pub async fn update_quantity(&mut self, product_id: &ProductId, size: &str, quantity: u32) {
        self.cart
            .set_quantity(&self.session, product_id, size, quantity)
            .await;
    }

    /// Submit the cart as an order. See [`checkout::place_order`].
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` for violated preconditions or a backend
    /// rejection.
    pub async fn place_order(
        &mut self,
        shipping: &ShippingInfo,
        payment_method: PaymentMethod,
    ) -> Result<Order, CheckoutError> {
        checkout::place_order(
            &self.api,
            &self.session,
            &mut self.cart,
            &self.catalog,
            shipping,
            payment_method,
            self.config.delivery_fee,
        )
        .await
    }

    /// Cart subtotal priced against the catalog.
    #[must_use]
    pub fn cart_amount(&self) -> Decimal {
        self.cart.amount(&self.catalog)
    }

    /// Checkout total: subtotal plus the flat delivery fee.
    #[must_use]
    pub fn checkout_total(&self) -> Decimal {
        self.cart_amount() + self.config.delivery_fee
    }

    /// The configuration this shop was built with.
    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// The backend API client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The authentication session.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    /// Reload the catalog (stale-but-available on failure).
    pub async fn reload_catalog(&mut self) {
        self.catalog.load().await;
    }

    /// The cart manager.
    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Mutable cart access, for flag management (`clear_error`).
    pub fn cart_mut(&mut self) -> &mut CartManager {
        &mut self.cart
    }
}
