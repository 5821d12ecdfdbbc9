//! Career Closet storefront client library.
//!
//! A client for the Career Closet REST backend: product catalog, shopping
//! cart, authentication session, and checkout. The view layer (CLI, web,
//! whatever) holds a [`state::Shop`] and reads projections from its stores;
//! it never touches the underlying state directly.
//!
//! # Architecture
//!
//! - [`api`] - `reqwest`-based JSON client for the backend contract
//! - [`models`] - wire and domain types (products, cart aggregate, orders)
//! - [`stores`] - the stateful stores: session, catalog cache, cart manager
//! - [`state`] - the application root that owns all of the above
//!
//! # Consistency model
//!
//! Cart mutations are optimistic: local state is updated first, then the
//! change is persisted to the backend. A failed persistence call never rolls
//! the local state back; it sets a sticky, user-visible error instead. The
//! client is authoritative and the last write wins.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod stores;

pub use config::ShopConfig;
pub use error::{Result, ShopError};
pub use state::Shop;
