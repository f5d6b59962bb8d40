//! Product comments.

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use super::{CommentId, ProductId};

/// Spanish short month names, as the storefront displays dates.
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// A comment shown in the comment widget.
///
/// Locally created comments carry a timestamp-derived ID; comments fetched
/// from `/comentarios/producto/{id}` carry the backend's ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// Author display name.
    #[serde(rename = "nombre", default)]
    pub author: String,
    /// Comment body.
    #[serde(rename = "comentario")]
    pub body: String,
    /// Creation date, already formatted for display.
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(
        rename = "productoId",
        alias = "producto_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<ProductId>,
}

/// Payload for `POST /comentarios` (the client adds `usuarioId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    #[serde(rename = "comentario")]
    pub body: String,
}

/// Format a timestamp the way comment dates are displayed, e.g. `23 nov 2025`.
#[must_use]
pub fn format_comment_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let month = MONTHS_ES
        .get(at.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{} {month} {}", at.day(), at.year())
}
