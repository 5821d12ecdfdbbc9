//! Checkout and order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use career_closet_core::{OrderId, UserId};

use super::cart::CartAggregate;

/// Shipping details collected at checkout. All fields are required and
/// must be non-blank before an order is submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingInfo {
    /// Name of the first blank (empty after trimming) field, if any.
    #[must_use]
    pub fn first_blank_field(&self) -> Option<&'static str> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
        ];
        fields
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }
}

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
}

/// Body of `POST /orders`: the full cart snapshot plus checkout metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: UserId,
    pub items: CartAggregate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub shipping_address: ShippingInfo,
    pub payment_method: PaymentMethod,
}

/// Order record returned by the backend after placement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}
