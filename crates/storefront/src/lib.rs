//! Tienda Storefront library.
//!
//! Client-side half of the storefront: the REST API client, the session
//! storage port, and the front-end state for the catalog, the cart, and the
//! comment widget.
//!
//! # Architecture
//!
//! - [`api::ApiClient`] is constructed explicitly and passed to whoever
//!   needs it; there is no global client.
//! - The session (auth token and user profile) lives behind the
//!   [`storage::SessionStore`] port.
//! - [`state`] holds plain structs mutated by user events; they talk to the
//!   backend only through the small traits in [`api`], so tests can hand
//!   them fakes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod state;
pub mod storage;
