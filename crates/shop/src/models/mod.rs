//! Wire and domain types for the storefront client.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartAggregate, CartLine};
pub use order::{Order, OrderRequest, PaymentMethod, ShippingInfo};
pub use product::{DEFAULT_SIZES, Product};
pub use user::{StoredAuth, UserProfile};
