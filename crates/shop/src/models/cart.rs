//! The cart aggregate: every line of the current session's cart.
//!
//! The aggregate is a two-level map, `product -> size -> quantity`, matching
//! the backend's `{ items: { [productId]: { [size]: quantity } } }` wire
//! shape. Invariant: a key exists only while its quantity is positive.
//! Setting a quantity to zero removes the line, and removing the last size
//! under a product removes the product entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use career_closet_core::ProductId;

/// One `(product, size) -> quantity` entry, flattened for consumers that
/// want a line list (cart page, checkout summary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub size: String,
    pub quantity: u32,
}

/// The full cart state for the current session.
///
/// Structural equality (`PartialEq`) is what the stores use for the
/// no-op-on-equal-state guard before persisting a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartAggregate(BTreeMap<ProductId, BTreeMap<String, u32>>);

impl CartAggregate {
    /// Create an empty aggregate.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// True if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Current quantity for a line, 0 if absent.
    #[must_use]
    pub fn quantity(&self, product_id: &ProductId, size: &str) -> u32 {
        self.0
            .get(product_id)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(0)
    }

    /// Increment a line by `delta`, creating it if absent.
    ///
    /// Returns the new quantity of the line.
    pub fn add(&mut self, product_id: &ProductId, size: &str, delta: u32) -> u32 {
        let entry = self
            .0
            .entry(product_id.clone())
            .or_default()
            .entry(size.to_owned())
            .or_insert(0);
        *entry = entry.saturating_add(delta);
        *entry
    }

    /// True if the cart holds any line for this product.
    #[must_use]
    pub fn contains_product(&self, product_id: &ProductId) -> bool {
        self.0.contains_key(product_id)
    }

    /// Set a line to an exact quantity.
    ///
    /// A quantity of 0 removes the line, and the product entry if that was
    /// its last size.
    pub fn set(&mut self, product_id: &ProductId, size: &str, quantity: u32) {
        if quantity == 0 {
            if let Some(sizes) = self.0.get_mut(product_id) {
                sizes.remove(size);
                if sizes.is_empty() {
                    self.0.remove(product_id);
                }
            }
        } else {
            self.0
                .entry(product_id.clone())
                .or_default()
                .insert(size.to_owned(), quantity);
        }
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .map(|&q| u64::from(q))
            .sum()
    }

    /// Iterate all lines in map order.
    pub fn lines(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.0.iter().flat_map(|(product_id, sizes)| {
            sizes.iter().map(move |(size, &quantity)| CartLine {
                product_id: product_id.clone(),
                size: size.clone(),
                quantity,
            })
        })
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}
