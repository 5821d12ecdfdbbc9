//! Stateful stores: session, catalog cache, cart manager, checkout.
//!
//! Each store is owned by the application root ([`crate::state::Shop`])
//! and exposed to the view layer as read-only projections plus mutation
//! methods. None of them hold locks; mutations take `&mut self` and the
//! UI serializes user actions.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use cart::CartManager;
pub use catalog::{CatalogCache, CatalogPage, CatalogQuery, PAGE_SIZE, SortOrder};
pub use checkout::CheckoutError;
pub use session::{AuthError, SessionStore, TokenCache};
