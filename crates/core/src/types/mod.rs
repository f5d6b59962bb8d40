//! Core types for Tienda.
//!
//! This module provides type-safe wrappers and the client-side domain model.

pub mod cart;
pub mod comment;
pub mod id;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use cart::{Cart, CartError, CartLine};
pub use comment::{Comment, NewComment, format_comment_date};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, ProductInput};
pub use status::StockLevel;
pub use user::{Credentials, Registration, UserProfile};
