//! Cart aggregate manager.
//!
//! Owns the cart aggregate and keeps it in sync with the backend. Every
//! mutation is optimistic: the local aggregate is updated first, then the
//! change is persisted when the session is authenticated. Persistence
//! failure never rolls the local state back; it sets a sticky error for
//! the view layer and the local copy stays authoritative (last write
//! wins). An out-of-order server arrival can leave the backend one step
//! behind until the next `load()`.
//!
//! Mutations take `&mut self`, so rapid repeated calls on the same line
//! are serialized within a session rather than racing.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use career_closet_core::{ProductId, UserId};

use crate::api::ApiClient;
use crate::models::{CartAggregate, CartLine};
use crate::stores::catalog::CatalogCache;
use crate::stores::session::SessionStore;

/// Message shown when a cart write fails to persist.
const UPDATE_FAILED: &str = "Failed to update cart. Please try again.";

/// Message shown when the cart fails to load.
const LOAD_FAILED: &str = "Failed to load cart. Please try again.";

/// The cart aggregate plus its loading/error flags.
pub struct CartManager {
    api: ApiClient,
    items: CartAggregate,
    loading: bool,
    error: Option<String>,
}

impl CartManager {
    /// Create an empty cart manager.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: CartAggregate::new(),
            loading: false,
            error: None,
        }
    }

    /// The current aggregate. Read-only; mutations go through
    /// [`add_line`](Self::add_line) and [`set_quantity`](Self::set_quantity).
    #[must_use]
    pub const fn items(&self) -> &CartAggregate {
        &self.items
    }

    /// All lines in map order.
    pub fn lines(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.items.lines()
    }

    /// Whether a cart load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The sticky error from the last failed load or write, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the sticky error (e.g. after the view has shown it).
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the aggregate with the user's persisted cart.
    ///
    /// On failure the aggregate keeps its previous value, the sticky error
    /// is set, and the loading flag is cleared.
    pub async fn load(&mut self, user_id: &UserId) {
        self.loading = true;
        self.error = None;
        match self.api.get_cart(user_id).await {
            Ok(items) => {
                debug!(user_id = %user_id, lines = items.count(), "cart loaded");
                self.items = items;
            }
            Err(e) => {
                warn!(error = %e, "failed to load cart");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Add one unit of `(product, size)` to the cart.
    ///
    /// Creates the line at quantity 1 or increments an existing one. If
    /// the resulting aggregate is structurally equal to the current one,
    /// nothing changes and no network call is made.
    pub async fn add_line(&mut self, session: &SessionStore, product_id: &ProductId, size: &str) {
        let mut next = self.items.clone();
        let quantity = next.add(product_id, size, 1);

        if next == self.items {
            return;
        }
        self.items = next;

        let Some(user_id) = session.user_id() else {
            return;
        };
        if let Err(e) = self
            .api
            .add_cart_item(user_id, product_id, size, quantity)
            .await
        {
            warn!(error = %e, product_id = %product_id, size, "failed to persist cart add");
            self.error = Some(UPDATE_FAILED.to_string());
        }
    }

    /// Set `(product, size)` to an exact quantity; 0 removes the line.
    ///
    /// A product the cart does not hold is a no-op. The local aggregate is
    /// updated optimistically; when authenticated, removal issues a DELETE
    /// and any other quantity a PUT. The equal-state guard makes repeated
    /// calls with the same quantity free: one state transition, at most
    /// one network call.
    pub async fn set_quantity(
        &mut self,
        session: &SessionStore,
        product_id: &ProductId,
        size: &str,
        quantity: u32,
    ) {
        if !self.items.contains_product(product_id) {
            return;
        }

        let mut next = self.items.clone();
        next.set(product_id, size, quantity);

        if next == self.items {
            return;
        }
        self.items = next;

        let Some(user_id) = session.user_id() else {
            return;
        };
        let result = if quantity == 0 {
            self.api.delete_cart_item(user_id, product_id, size).await
        } else {
            self.api
                .update_cart_item(user_id, product_id, size, quantity)
                .await
        };
        if let Err(e) = result {
            warn!(error = %e, product_id = %product_id, size, quantity, "failed to persist cart update");
            self.error = Some(UPDATE_FAILED.to_string());
        }
    }

    /// Total item count across all lines. Recomputed on demand.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.count()
    }

    /// Cart subtotal: Σ price × quantity over lines whose product exists
    /// in the catalog.
    ///
    /// A line whose product is absent from the catalog (cart loaded before
    /// the catalog, product retired server-side) contributes 0. Totals
    /// never fail.
    #[must_use]
    pub fn amount(&self, catalog: &CatalogCache) -> Decimal {
        self.items
            .lines()
            .filter_map(|line| {
                catalog
                    .get(&line.product_id)
                    .map(|product| product.price * Decimal::from(line.quantity))
            })
            .sum()
    }

    /// Drop every line and the sticky error. Used on logout and when a
    /// session restore fails.
    pub fn clear(&mut self) {
        self.items.clear();
        self.error = None;
    }
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

    /// An unauthenticated session: mutations stay local, no network.
    fn guest_session(dir: &std::path::Path) -> SessionStore {
        SessionStore::new(api(), TokenCache::new(dir.join("auth.json")))
    }

    fn p(id: &str) -> ProductId {
        ProductId::new(id)
    }

    fn catalog_with(products: serde_json::Value) -> CatalogCache {
        // No network in tests: inject via the serde boundary.
        let products: Vec<crate::models::Product> = serde_json::from_value(products).unwrap();
        let mut catalog = CatalogCache::new(api());
        catalog.set_products_for_tests(products);
        catalog
    }

    #[tokio::test]
    async fn test_add_line_builds_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        cart.add_line(&session, &p("p1"), "M").await;
        assert_eq!(cart.items().quantity(&p("p1"), "M"), 1);

        cart.add_line(&session, &p("p1"), "M").await;
        assert_eq!(cart.items().quantity(&p("p1"), "M"), 2);
        assert_eq!(cart.count(), 2);
    }

    #[tokio::test]
    async fn test_set_quantity_zero_empties_cart() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        cart.add_line(&session, &p("p1"), "M").await;
        cart.add_line(&session, &p("p1"), "M").await;
        cart.set_quantity(&session, &p("p1"), "M", 0).await;
        assert!(cart.items().is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[tokio::test]
    async fn test_set_quantity_on_absent_product_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        cart.set_quantity(&session, &p("ghost"), "M", 5).await;
        assert!(cart.items().is_empty());
    }

    #[tokio::test]
    async fn test_set_same_quantity_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        cart.add_line(&session, &p("p1"), "M").await;
        cart.set_quantity(&session, &p("p1"), "M", 3).await;
        let snapshot = cart.items().clone();

        // Second call hits the equal-state guard: no transition. With an
        // authenticated session this is also what suppresses the second
        // network call.
        cart.set_quantity(&session, &p("p1"), "M", 3).await;
        assert_eq!(cart.items(), &snapshot);
    }

    #[tokio::test]
    async fn test_quantities_never_non_positive() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        cart.add_line(&session, &p("p1"), "M").await;
        cart.add_line(&session, &p("p2"), "S").await;
        cart.set_quantity(&session, &p("p1"), "M", 0).await;
        cart.set_quantity(&session, &p("p2"), "S", 4).await;

        for line in cart.lines() {
            assert!(line.quantity > 0);
        }
    }

    #[tokio::test]
    async fn test_failed_load_sets_error_and_keeps_items() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());

        // Nothing listens on the discard port; the request is refused.
        let config = ShopConfig::with_api_url("http://127.0.0.1:9").unwrap();
        let mut cart = CartManager::new(ApiClient::new(&config).unwrap());

        cart.add_line(&session, &p("p1"), "M").await;
        let snapshot = cart.items().clone();

        cart.load(&UserId::new("u1")).await;
        assert!(cart.error().is_some());
        assert!(!cart.is_loading());
        assert_eq!(cart.items(), &snapshot);
    }

    #[tokio::test]
    async fn test_amount_skips_unknown_products() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        let catalog = catalog_with(serde_json::json!([{
            "_id": "p1",
            "name": "Scrub Top",
            "price": 100,
            "category": "Medicine",
            "subCategory": "Topwear",
            "image": "x.jpg"
        }]));

        cart.add_line(&session, &p("p1"), "M").await;
        cart.add_line(&session, &p("p1"), "M").await;
        // p2 is in the cart but not the catalog: contributes 0.
        cart.add_line(&session, &p("p2"), "L").await;

        assert_eq!(cart.amount(&catalog), Decimal::from(200));
    }

    #[tokio::test]
    async fn test_amount_of_empty_cart_is_zero() {
        let cart = CartManager::new(api());
        let catalog = CatalogCache::new(api());
        assert_eq!(cart.amount(&catalog), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_clear_drops_lines_and_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = guest_session(dir.path());
        let mut cart = CartManager::new(api());

        cart.add_line(&session, &p("p1"), "M").await;
        cart.clear();
        assert!(cart.items().is_empty());
        assert!(cart.error().is_none());
    }
}
