//! Comment operations.

use serde::Serialize;
use tienda_core::{Comment, NewComment, ProductId, UserId};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// `POST /comentarios` body: the comment plus the author's user ID.
#[derive(Serialize)]
struct CreateCommentBody<'a> {
    #[serde(flatten)]
    comment: &'a NewComment,
    #[serde(rename = "usuarioId")]
    user_id: UserId,
}

impl ApiClient {
    /// Comments for a product. Empty on failure.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn list_comments(&self, product_id: ProductId) -> Vec<Comment> {
        self.get(&format!("/comentarios/producto/{product_id}"), "list_comments")
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, product_id = %product_id, "Error fetching comments");
                Vec::new()
            })
    }

    /// Post a comment as the stored user.
    ///
    /// The user check happens before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] if no user is stored, otherwise
    /// any request or backend error.
    #[instrument(skip(self, comment), fields(product_id = %comment.product_id))]
    pub async fn create_comment(&self, comment: &NewComment) -> Result<serde_json::Value, ApiError> {
        let Some(user) = self.current_user() else {
            tracing::error!("No stored user when creating comment");
            return Err(ApiError::Unauthenticated);
        };

        let body = CreateCommentBody {
            comment,
            user_id: user.id,
        };

        self.post("/comentarios", &body, "create_comment")
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error creating comment"))
    }
}
