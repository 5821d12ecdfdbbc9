//! Catalog cache and listing queries.
//!
//! The catalog is fetched once per session and held as a normalized list.
//! A failed reload keeps whatever was loaded before (stale-but-available)
//! and logs the failure; the catalog never surfaces load errors to the
//! user. Listing views consume [`CatalogQuery`], which owns the filter,
//! sort, and pagination state for one listing screen.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use career_closet_core::ProductId;

use crate::api::{ApiClient, ApiError};
use crate::models::Product;

/// Products per listing page.
pub const PAGE_SIZE: usize = 12;

/// Sort orders for a listing view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Insertion order, as returned by the backend.
    #[default]
    Relevant,
    PriceAscending,
    PriceDescending,
}

/// One page of a filtered, sorted listing.
#[derive(Debug)]
pub struct CatalogPage<'a> {
    /// Products on the current page, in display order.
    pub items: Vec<&'a Product>,
    /// 1-based page number.
    pub page: usize,
    /// Total pages for the current working set (at least 1).
    pub total_pages: usize,
    /// Size of the working set before pagination.
    pub total_items: usize,
}

/// The in-memory product catalog.
pub struct CatalogCache {
    api: ApiClient,
    products: Vec<Product>,
    loading: bool,
}

impl CatalogCache {
    /// Create an empty catalog backed by the given API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            products: Vec::new(),
            loading: false,
        }
    }

    /// Fetch the product list, replacing the cache on success.
    ///
    /// On failure the previous data stays in place and the failure is
    /// logged; callers keep serving the stale copy.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.api.list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "catalog loaded");
                self.products = products;
            }
            Err(e) => {
                warn!(error = %e, "failed to load catalog, keeping previous data");
            }
        }
        self.loading = false;
    }

    /// Whether a load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// All cached products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Cached lookup by ID. Pure; never touches the network.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[cfg(test)]
    pub(crate) fn set_products_for_tests(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Deep-link fallback: cached lookup first, remote fetch on a miss.
    ///
    /// A miss in the cache is a legitimate path (e.g. a product page opened
    /// before the catalog finished loading), not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the remote fetch itself fails.
    pub async fn get_or_fetch(&self, id: &ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.get(id) {
            return Ok(product.clone());
        }
        self.api.get_product(id).await
    }
}

/// Filter, sort, and pagination state for one listing view.
///
/// Filters compose conjunctively: AND across dimensions, OR within the
/// selected set of one dimension. Any filter or sort change resets the
/// page to 1.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    search: Option<String>,
    categories: BTreeSet<String>,
    sub_categories: BTreeSet<String>,
    sort: SortOrder,
    page: usize,
}

impl CatalogQuery {
    /// Fresh query: no filters, relevant order, page 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Set or clear the free-text name search.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.filter(|s| !s.is_empty());
        self.page = 1;
    }

    /// Toggle a category in the selected set.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_owned());
        }
        self.page = 1;
    }

    /// Toggle a subcategory in the selected set.
    pub fn toggle_sub_category(&mut self, sub_category: &str) {
        if !self.sub_categories.remove(sub_category) {
            self.sub_categories.insert(sub_category.to_owned());
        }
        self.page = 1;
    }

    /// Change the sort order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.page = 1;
    }

    /// Current sort order.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Jump to a page; clamped into range when the query is applied.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Move one page forward.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Move one page back, stopping at 1.
    pub fn previous_page(&mut self) {
        self.page = (self.page.saturating_sub(1)).max(1);
    }

    /// Apply the query to a product list: filter, then sort, then slice
    /// the current page.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> CatalogPage<'a> {
        let mut working: Vec<&Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .collect();

        match self.sort {
            SortOrder::Relevant => {}
            SortOrder::PriceAscending => working.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDescending => working.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        let total_items = working.len();
        let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
        let page = self.page.clamp(1, total_pages);
        let start = (page - 1) * PAGE_SIZE;
        let items = working
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect();

        CatalogPage {
            items,
            page,
            total_pages,
            total_items,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search
            && !product.name.to_lowercase().contains(&search.to_lowercase())
        {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        if !self.sub_categories.is_empty() && !self.sub_categories.contains(&product.sub_category)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, price: i64, category: &str, sub: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": name,
            "price": price,
            "category": category,
            "subCategory": sub,
            "image": "x.jpg"
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Scrub Top", 100, "Medicine", "Topwear"),
            product("p2", "Work Boot", 250, "Construction", "Bottomwear"),
            product("p3", "Chef Jacket", 180, "Hospitality", "Topwear"),
            product("p4", "Scrub Pants", 120, "Medicine", "Bottomwear"),
            product("p5", "Hard Hat", 80, "Construction", "Winterwear"),
        ]
    }

    fn ids<'a>(page: &'a CatalogPage<'a>) -> Vec<&'a str> {
        page.items.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_insertion_order() {
        let products = catalog();
        let query = CatalogQuery::new();
        let page = query.apply(&products);
        assert_eq!(ids(&page), vec!["p1", "p2", "p3", "p4", "p5"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let products = catalog();
        let mut query = CatalogQuery::new();
        query.set_search(Some("scrub".to_string()));
        let page = query.apply(&products);
        assert_eq!(ids(&page), vec!["p1", "p4"]);
    }

    #[test]
    fn test_category_filter_is_or_within_dimension() {
        let products = catalog();
        let mut query = CatalogQuery::new();
        query.toggle_category("Medicine");
        query.toggle_category("Hospitality");
        let page = query.apply(&products);
        assert_eq!(ids(&page), vec!["p1", "p3", "p4"]);
    }

    #[test]
    fn test_dimensions_compose_conjunctively() {
        let products = catalog();
        let mut query = CatalogQuery::new();
        query.toggle_category("Medicine");
        query.toggle_sub_category("Bottomwear");
        let page = query.apply(&products);
        assert_eq!(ids(&page), vec!["p4"]);
    }

    #[test]
    fn test_filter_dimensions_commute() {
        let products = catalog();

        let mut cat_first = CatalogQuery::new();
        cat_first.toggle_category("Construction");
        cat_first.toggle_sub_category("Bottomwear");

        let mut sub_first = CatalogQuery::new();
        sub_first.toggle_sub_category("Bottomwear");
        sub_first.toggle_category("Construction");

        assert_eq!(
            ids(&cat_first.apply(&products)),
            ids(&sub_first.apply(&products))
        );
    }

    #[test]
    fn test_toggle_twice_clears_the_filter() {
        let products = catalog();
        let mut query = CatalogQuery::new();
        query.toggle_category("Medicine");
        query.toggle_category("Medicine");
        let page = query.apply(&products);
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn test_sort_changes_order_not_membership() {
        let products = catalog();
        let mut query = CatalogQuery::new();
        query.toggle_sub_category("Topwear");

        let relevant: BTreeSet<String> = query
            .apply(&products)
            .items
            .iter()
            .map(|p| p.id.to_string())
            .collect();

        query.set_sort(SortOrder::PriceAscending);
        let ascending = query.apply(&products);
        assert_eq!(ids(&ascending), vec!["p1", "p3"]);

        let ascending_set: BTreeSet<String> =
            ascending.items.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(relevant, ascending_set);

        query.set_sort(SortOrder::PriceDescending);
        let descending = query.apply(&products);
        assert_eq!(ids(&descending), vec!["p3", "p1"]);
    }

    #[test]
    fn test_price_sort_uses_decimal_ordering() {
        let products = vec![
            product("a", "A", 100, "Medicine", "Topwear"),
            product("b", "B", 20, "Medicine", "Topwear"),
        ];
        let mut query = CatalogQuery::new();
        query.set_sort(SortOrder::PriceAscending);
        let page = query.apply(&products);
        assert_eq!(ids(&page), vec!["b", "a"]);
        assert_eq!(page.items.first().unwrap().price, Decimal::from(20));
    }

    #[test]
    fn test_pagination_slices_fixed_pages() {
        let products: Vec<Product> = (0..30)
            .map(|i| product(&format!("p{i}"), &format!("Item {i}"), i, "Medicine", "Topwear"))
            .collect();

        let mut query = CatalogQuery::new();
        let first = query.apply(&products);
        assert_eq!(first.items.len(), PAGE_SIZE);
        assert_eq!(first.total_pages, 3);

        query.next_page();
        let second = query.apply(&products);
        assert_eq!(second.page, 2);
        assert_eq!(second.items.first().unwrap().id.as_str(), "p12");

        // Page past the end clamps to the last page.
        query.go_to_page(99);
        let last = query.apply(&products);
        assert_eq!(last.page, 3);
        assert_eq!(last.items.len(), 6);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = CatalogQuery::new();
        query.go_to_page(3);
        assert_eq!(query.page(), 3);

        query.toggle_category("Medicine");
        assert_eq!(query.page(), 1);

        query.go_to_page(2);
        query.set_sort(SortOrder::PriceAscending);
        assert_eq!(query.page(), 1);

        query.go_to_page(2);
        query.set_search(Some("scrub".to_string()));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_previous_page_stops_at_one() {
        let mut query = CatalogQuery::new();
        query.previous_page();
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_empty_working_set_still_reports_one_page() {
        let products = catalog();
        let mut query = CatalogQuery::new();
        query.set_search(Some("no such product".to_string()));
        let page = query.apply(&products);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }
}
