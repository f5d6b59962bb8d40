//! Front-end state.
//!
//! Each struct here is owned by exactly one view and mutated only through
//! `&mut self` in response to user or mount events. They reach the backend
//! through the traits in [`crate::api`], never through a shared client.

pub mod catalog;
pub mod comments;

pub use catalog::{ALL_CATEGORIES_LABEL, Catalog, CategoryFilter};
pub use comments::{CommentWidget, DEFAULT_AUTHOR, Key, KeyAction, KeyPress, Notice};
