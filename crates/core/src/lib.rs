//! Career Closet Core - Shared types library.
//!
//! This crate provides common types used across the Career Closet client
//! components:
//! - `shop` - Storefront client library (catalog, cart, session, checkout)
//! - `cli` - Command-line driver for the storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
