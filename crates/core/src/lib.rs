//! Tienda Core - Shared domain types.
//!
//! This crate provides the types used across all Tienda components:
//! - `storefront` - REST API client and front-end state (catalog, cart, comments)
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. Wire names follow the backend's JSON shapes
//! (`nombre`, `precio`, `cantidad`, ...) while the Rust API uses English.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products, carts, comments and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
