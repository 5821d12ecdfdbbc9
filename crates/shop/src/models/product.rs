//! Product domain type and wire-shape normalization.
//!
//! The backend is loose about product shape: `image` may be a single URL or
//! an array of URLs, and `sizes` may be missing or empty. Normalization
//! happens once, at the serde boundary, so downstream code never branches
//! on shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use career_closet_core::ProductId;

/// Sizes assumed when the backend omits them.
pub const DEFAULT_SIZES: [&str; 4] = ["S", "M", "L", "XL"];

/// A catalog product, normalized.
///
/// `images` and `sizes` are always ordered sequences; `sizes` is never
/// empty (it falls back to [`DEFAULT_SIZES`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawProduct")]
pub struct Product {
    /// Backend-assigned opaque ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Price in the catalog's currency unit.
    pub price: Decimal,
    /// Top-level category (e.g. "Medicine", "Construction").
    pub category: String,
    /// Secondary category (e.g. "Topwear").
    pub sub_category: String,
    /// Image URLs, first one is the primary image.
    pub images: Vec<String>,
    /// Available size labels, in display order.
    pub sizes: Vec<String>,
}

/// Wire value that is either a single string or an array of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Raw product as the backend sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(rename = "_id")]
    id: ProductId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    category: String,
    sub_category: String,
    #[serde(default)]
    image: Option<OneOrMany>,
    #[serde(default)]
    sizes: Option<Vec<String>>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        let images = raw.image.map(Vec::from).unwrap_or_default();
        let sizes = match raw.sizes {
            Some(sizes) if !sizes.is_empty() => sizes,
            _ => DEFAULT_SIZES.iter().map(ToString::to_string).collect(),
        };

        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            price: raw.price,
            category: raw.category,
            sub_category: raw.sub_category,
            images,
            sizes,
        }
    }
}

impl Product {
    /// Primary image URL, if the product has any image at all.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Product {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_single_image_becomes_singleton_list() {
        let product = parse(
            r#"{
                "_id": "p1",
                "name": "Scrub Top",
                "price": 100,
                "category": "Medicine",
                "subCategory": "Topwear",
                "image": "https://cdn.example/p1.jpg"
            }"#,
        );
        assert_eq!(product.images, vec!["https://cdn.example/p1.jpg"]);
        assert_eq!(product.primary_image(), Some("https://cdn.example/p1.jpg"));
    }

    #[test]
    fn test_image_array_preserved_in_order() {
        let product = parse(
            r#"{
                "_id": "p1",
                "name": "Scrub Top",
                "price": 100,
                "category": "Medicine",
                "subCategory": "Topwear",
                "image": ["a.jpg", "b.jpg"]
            }"#,
        );
        assert_eq!(product.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_missing_sizes_fall_back_to_defaults() {
        let product = parse(
            r#"{
                "_id": "p1",
                "name": "Scrub Top",
                "price": 100,
                "category": "Medicine",
                "subCategory": "Topwear",
                "image": "a.jpg"
            }"#,
        );
        assert_eq!(product.sizes, vec!["S", "M", "L", "XL"]);
    }

    #[test]
    fn test_empty_sizes_fall_back_to_defaults() {
        let product = parse(
            r#"{
                "_id": "p1",
                "name": "Scrub Top",
                "price": 100,
                "category": "Medicine",
                "subCategory": "Topwear",
                "image": "a.jpg",
                "sizes": []
            }"#,
        );
        assert_eq!(product.sizes, vec!["S", "M", "L", "XL"]);
    }

    #[test]
    fn test_explicit_sizes_kept_in_order() {
        let product = parse(
            r#"{
                "_id": "p1",
                "name": "Work Boot",
                "price": 250.5,
                "category": "Construction",
                "subCategory": "Bottomwear",
                "image": "a.jpg",
                "sizes": ["8", "9", "10"]
            }"#,
        );
        assert_eq!(product.sizes, vec!["8", "9", "10"]);
        assert_eq!(product.price, Decimal::new(2505, 1));
    }

    #[test]
    fn test_missing_image_is_empty_list() {
        let product = parse(
            r#"{
                "_id": "p1",
                "name": "Scrub Top",
                "price": 100,
                "category": "Medicine",
                "subCategory": "Topwear"
            }"#,
        );
        assert!(product.images.is_empty());
        assert_eq!(product.primary_image(), None);
    }
}
